//! MetaRegistry - フィールドの登録と管理
//!
//! HashMap<FieldKey, Arc<dyn MetaField>> で型消去されたフィールドを保持します。

use std::collections::HashMap;
use std::sync::Arc;

use super::meta_field::{FieldKey, MetaField};

/// RegistryError は MetaRegistry の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Meta field '{0}' is already registered")]
    AlreadyRegistered(FieldKey),
}

/// Registered custom fields, keyed by `(post_type, key)`.
#[derive(Default)]
pub struct MetaRegistry {
    fields: HashMap<FieldKey, Arc<dyn MetaField>>,
}

impl MetaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F: MetaField + 'static>(&mut self, field: F) -> Result<(), RegistryError> {
        let key = field.spec().field_key();
        if self.fields.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered(key));
        }
        self.fields.insert(key, Arc::new(field));
        Ok(())
    }

    pub fn get(&self, post_type: &str, key: &str) -> Option<Arc<dyn MetaField>> {
        self.fields.get(&FieldKey::new(post_type, key)).cloned()
    }

    /// Registered fields as `post_type.key`, sorted.
    pub fn registered_fields(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fields.keys().map(ToString::to_string).collect();
        keys.sort();
        keys
    }

    /// Fields of `post_type` that the REST API exposes, sorted by key.
    pub fn rest_fields(&self, post_type: &str) -> Vec<Arc<dyn MetaField>> {
        let mut fields: Vec<Arc<dyn MetaField>> = self
            .fields
            .iter()
            .filter(|(k, f)| k.post_type == post_type && f.spec().show_in_rest)
            .map(|(_, f)| f.clone())
            .collect();
        fields.sort_by(|a, b| a.spec().key.cmp(&b.spec().key));
        fields
    }
}
