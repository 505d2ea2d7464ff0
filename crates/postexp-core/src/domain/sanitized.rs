//! Outcome of sanitizing a proposed expiration value.

use serde::Serialize;

use super::errors::RejectReason;

/// What the sanitizer decided about a proposed value.
///
/// Storage keeps the old contract (a rejected value is stored as `""`),
/// but the reason stays available to whoever called the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Sanitized {
    /// Value to store. Empty means the field was cleared on purpose.
    Accepted(String),
    Rejected(RejectReason),
}

impl Sanitized {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Sanitized::Accepted(_))
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Sanitized::Accepted(_) => None,
            Sanitized::Rejected(reason) => Some(reason),
        }
    }

    /// Value that ends up in storage.
    pub fn into_stored(self) -> String {
        match self {
            Sanitized::Accepted(value) => value,
            Sanitized::Rejected(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_stores_empty_string() {
        let s = Sanitized::Rejected(RejectReason::Format {
            candidate: "soon".to_string(),
        });
        assert!(!s.is_accepted());
        assert_eq!(s.reason().map(RejectReason::code), Some("format"));
        assert_eq!(s.into_stored(), "");
    }

    #[test]
    fn accepted_stores_value() {
        let s = Sanitized::Accepted("2099-01-01 00:00:00".to_string());
        assert!(s.reason().is_none());
        assert_eq!(s.into_stored(), "2099-01-01 00:00:00");
    }

    #[test]
    fn serializes_with_status_tag() {
        let s = Sanitized::Accepted("2099-01-01 00:00:00".to_string());
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({"status": "accepted", "value": "2099-01-01 00:00:00"})
        );
    }
}
