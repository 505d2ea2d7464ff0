//! Expiry determination result.

use serde::{Deserialize, Serialize};

/// Read-time status of a stored expiration value.
///
/// `Indeterminate` covers both "unset" and "unparsable"; either way the
/// caller must not assert a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryResult {
    Expired,
    NotExpired,
    Indeterminate,
}

impl ExpiryResult {
    /// The `is_expired` flag to publish, if any.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            ExpiryResult::Expired => Some(true),
            ExpiryResult::NotExpired => Some(false),
            ExpiryResult::Indeterminate => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryResult::Expired => "expired",
            ExpiryResult::NotExpired => "not_expired",
            ExpiryResult::Indeterminate => "indeterminate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ExpiryResult::Expired, Some(true))]
    #[case(ExpiryResult::NotExpired, Some(false))]
    #[case(ExpiryResult::Indeterminate, None)]
    fn flag_mapping(#[case] result: ExpiryResult, #[case] flag: Option<bool>) {
        assert_eq!(result.as_flag(), flag);
    }

    #[test]
    fn serializes_as_snake_case() {
        let s = serde_json::to_string(&ExpiryResult::NotExpired).unwrap();
        assert_eq!(s, "\"not_expired\"");
        assert_eq!(ExpiryResult::NotExpired.as_str(), "not_expired");
    }
}
