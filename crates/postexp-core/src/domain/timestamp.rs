//! ExpirationTimestamp: the string-encoded expiration value stored on a post.
//!
//! Two readings exist on purpose:
//! - `parse_strict` gates writes and only accepts the canonical layout.
//! - `parse_lenient` interprets whatever storage holds, since values may have
//!   been written by paths that never went through the sanitizer.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{RejectReason, UnparsableTimestamp};
use super::zone::HostTimeZone;

/// chrono layout of the canonical `YYYY-MM-DD HH:MM:SS` form.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Anchored syntactic check for the canonical form. No calendar validation.
///
/// ASCII digits only; `\d` in `regex` would also admit other Unicode digits.
pub static CANONICAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});

/// Naive layouts tried by the lenient reader, resolved in the host zone.
const LENIENT_DATETIME_FORMATS: &[&str] = &[
    CANONICAL_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const LENIENT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Raw expiration value as persisted under the post's meta key.
///
/// The empty string means "no expiration".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationTimestamp(String);

impl ExpirationTimestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches_canonical_pattern(&self) -> bool {
        CANONICAL_PATTERN.is_match(&self.0)
    }

    /// Canonical-only reading used at write time.
    pub fn parse_strict(&self, zone: HostTimeZone) -> Result<DateTime<Utc>, RejectReason> {
        if !self.matches_canonical_pattern() {
            return Err(RejectReason::Format {
                candidate: self.0.clone(),
            });
        }
        NaiveDateTime::parse_from_str(&self.0, CANONICAL_FORMAT)
            .ok()
            .and_then(|local| zone.resolve(local))
            .ok_or_else(|| RejectReason::Calendar {
                candidate: self.0.clone(),
            })
    }

    /// Permissive reading used when interpreting stored values.
    pub fn parse_lenient(&self, zone: HostTimeZone) -> Result<DateTime<Utc>, UnparsableTimestamp> {
        parse_lenient(self.0.trim(), zone).ok_or_else(|| UnparsableTimestamp {
            value: self.0.clone(),
        })
    }
}

impl fmt::Display for ExpirationTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render an instant in the canonical layout for the given zone.
pub fn format_canonical(instant: DateTime<Utc>, zone: HostTimeZone) -> String {
    instant
        .with_timezone(&zone.offset())
        .format(CANONICAL_FORMAT)
        .to_string()
}

fn parse_lenient(s: &str, zone: HostTimeZone) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Forms carrying their own offset win over the host zone.
    if let Some(epoch) = s.strip_prefix('@') {
        return epoch
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    LENIENT_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            LENIENT_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .and_then(|local| zone.resolve(local))
}
