//! Authorizer port - 権限チェック
//!
//! The host decides what an actor may do; the adapter only asks.

use serde::{Deserialize, Serialize};

/// Capabilities the adapter asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    EditPosts,
}

/// Who is acting on the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: String,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

pub trait Authorizer: Send + Sync {
    fn can(&self, actor: &Actor, capability: Capability) -> bool;
}
