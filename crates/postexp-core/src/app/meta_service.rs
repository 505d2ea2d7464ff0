//! MetaService - メタ書き込みのワイヤリング
//!
//! Write order for a registered field:
//! 1. capability check (denied writes never touch storage)
//! 2. sanitizer hook
//! 3. store whatever the sanitizer settled on (`""` for a rejection)

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::meta_field::FieldKey;
use super::registry::MetaRegistry;
use crate::domain::{Post, RejectReason};
use crate::ports::{Actor, Authorizer, Capability, Clock, MetaStore};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("meta field '{0}' is not registered")]
    UnknownField(FieldKey),

    #[error("{actor} ({role}) lacks {capability:?} required to write '{field}'")]
    Forbidden {
        actor: String,
        role: String,
        capability: Capability,
        field: FieldKey,
    },
}

/// What a write ended up storing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub stored: String,

    /// Set when the proposed value was refused and the field was cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectReason>,
}

pub struct MetaService {
    registry: Arc<MetaRegistry>,
    store: Arc<dyn MetaStore>,
    authorizer: Arc<dyn Authorizer>,
    clock: Arc<dyn Clock>,
}

impl MetaService {
    pub fn new(
        registry: Arc<MetaRegistry>,
        store: Arc<dyn MetaStore>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            authorizer,
            clock,
        }
    }

    pub fn registry(&self) -> &MetaRegistry {
        &self.registry
    }

    /// Save `raw` into `key` on `post` on behalf of `actor`.
    pub fn write_meta(
        &self,
        actor: &Actor,
        post: &Post,
        key: &str,
        raw: &str,
    ) -> Result<WriteReport, WriteError> {
        let field_key = FieldKey::new(&post.post_type, key);
        let field = self
            .registry
            .get(&post.post_type, key)
            .ok_or_else(|| WriteError::UnknownField(field_key.clone()))?;

        let capability = field.auth_capability();
        if !self.authorizer.can(actor, capability) {
            return Err(WriteError::Forbidden {
                actor: actor.name.clone(),
                role: actor.role.clone(),
                capability,
                field: field_key,
            });
        }

        let sanitized = field.sanitize(raw, self.clock.now());
        let rejection = sanitized.reason().cloned();
        let stored = sanitized.into_stored();

        match &rejection {
            Some(reason) => info!(
                post_id = %post.id,
                field = %field_key,
                reason = reason.code(),
                "rejected meta value; field cleared"
            ),
            None => debug!(post_id = %post.id, field = %field_key, value = %stored, "meta stored"),
        }

        self.store.set(post.id, key, stored.clone());
        Ok(WriteReport { stored, rejection })
    }

    /// Current stored value; an unwritten single string field reads as `""`.
    pub fn read_meta(&self, post: &Post, key: &str) -> String {
        self.store.get(post.id, key).unwrap_or_default()
    }
}
