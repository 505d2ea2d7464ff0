//! MetaField - ホストに登録するカスタムフィールド
//!
//! A field is a spec (what the host registers) plus two hooks the host calls:
//! a sanitizer on write and a capability check before the write.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Sanitized;
use crate::policy::ExpirationPolicy;
use crate::ports::Capability;

/// Value type advertised to the host's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaValueType {
    String,
}

/// Registration parameters for a custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFieldSpec {
    pub post_type: String,
    pub key: String,
    pub single: bool,
    #[serde(rename = "type")]
    pub value_type: MetaValueType,
    pub show_in_rest: bool,
}

impl MetaFieldSpec {
    /// Single-valued string field visible through the REST API.
    pub fn rest_string(post_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            post_type: post_type.into(),
            key: key.into(),
            single: true,
            value_type: MetaValueType::String,
            show_in_rest: true,
        }
    }

    pub fn field_key(&self) -> FieldKey {
        FieldKey::new(&self.post_type, &self.key)
    }
}

/// `(post_type, key)` pair identifying a registered field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub post_type: String,
    pub key: String,
}

impl FieldKey {
    pub fn new(post_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            post_type: post_type.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.post_type, self.key)
    }
}

/// Hooks the host invokes for a registered field.
pub trait MetaField: Send + Sync {
    fn spec(&self) -> &MetaFieldSpec;

    /// Decide what gets stored for a proposed raw value.
    fn sanitize(&self, raw: &str, now: DateTime<Utc>) -> Sanitized;

    /// Capability an actor needs to write this field.
    fn auth_capability(&self) -> Capability {
        Capability::EditPosts
    }
}

/// The `expiration_date` field.
#[derive(Debug, Clone)]
pub struct ExpirationField {
    spec: MetaFieldSpec,
    policy: ExpirationPolicy,
}

impl ExpirationField {
    pub fn new(spec: MetaFieldSpec, policy: ExpirationPolicy) -> Self {
        Self { spec, policy }
    }
}

impl MetaField for ExpirationField {
    fn spec(&self) -> &MetaFieldSpec {
        &self.spec
    }

    fn sanitize(&self, raw: &str, now: DateTime<Utc>) -> Sanitized {
        self.policy.sanitize(raw, now)
    }
}
