//! RoleAuthorizer - ロールごとの固定権限表

use std::collections::{HashMap, HashSet};

use crate::ports::{Actor, Authorizer, Capability};

/// Static role → capability table.
///
/// The default table mirrors the usual editorial roles: anyone from
/// contributor upwards may edit posts, subscribers may not.
#[derive(Debug, Clone)]
pub struct RoleAuthorizer {
    grants: HashMap<String, HashSet<Capability>>,
}

impl RoleAuthorizer {
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    pub fn grant(mut self, role: impl Into<String>, capability: Capability) -> Self {
        self.grants.entry(role.into()).or_default().insert(capability);
        self
    }
}

impl Default for RoleAuthorizer {
    fn default() -> Self {
        ["administrator", "editor", "author", "contributor"]
            .into_iter()
            .fold(Self::empty(), |auth, role| auth.grant(role, Capability::EditPosts))
    }
}

impl Authorizer for RoleAuthorizer {
    fn can(&self, actor: &Actor, capability: Capability) -> bool {
        self.grants
            .get(&actor.role)
            .is_some_and(|caps| caps.contains(&capability))
    }
}
