//! ExpirationPolicy: write-time validation and read-time expiry.
//!
//! Pure functions over `(value, now)`. The policy never reads a clock and
//! keeps no state between calls; `now` is always supplied by the caller.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{ExpirationTimestamp, ExpiryResult, HostTimeZone, RejectReason, Sanitized};

/// Validation and expiry rules for the `expiration_date` field.
///
/// The only configuration is the host zone used to read offset-less values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpirationPolicy {
    zone: HostTimeZone,
}

impl ExpirationPolicy {
    pub fn new(zone: HostTimeZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> HostTimeZone {
        self.zone
    }

    /// `true` iff `candidate` is canonical, a real date-time, and strictly
    /// after `now`. Never trims; surrounding whitespace fails the pattern.
    pub fn validate_future_timestamp(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        self.check_future_timestamp(candidate, now).is_ok()
    }

    /// Same rule as [`Self::validate_future_timestamp`], keeping the reason.
    pub fn check_future_timestamp(
        &self,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, RejectReason> {
        let instant = ExpirationTimestamp::new(candidate).parse_strict(self.zone)?;
        if instant > now {
            Ok(instant)
        } else {
            Err(RejectReason::NotInFuture {
                candidate: candidate.to_string(),
            })
        }
    }

    /// Expiry status of a stored value.
    ///
    /// Empty → `Indeterminate`. Unparsable → `Indeterminate` plus a debug event;
    /// callers that know which post they are shaping log it with the post id.
    /// An instant equal to `now` is not expired yet.
    pub fn is_expired(&self, stored: &str, now: DateTime<Utc>) -> ExpiryResult {
        let stored = ExpirationTimestamp::new(stored);
        if stored.is_unset() {
            return ExpiryResult::Indeterminate;
        }
        match stored.parse_lenient(self.zone) {
            Ok(instant) if instant < now => ExpiryResult::Expired,
            Ok(_) => ExpiryResult::NotExpired,
            Err(err) => {
                debug!(error = %err, "cannot determine expiry");
                ExpiryResult::Indeterminate
            }
        }
    }

    /// Sanitizer for proposed writes.
    ///
    /// Empty input clears the field. Anything else is trimmed and must pass
    /// [`Self::check_future_timestamp`]; the trimmed value is what gets stored.
    pub fn sanitize(&self, candidate: &str, now: DateTime<Utc>) -> Sanitized {
        if candidate.is_empty() {
            return Sanitized::Accepted(String::new());
        }
        let trimmed = candidate.trim();
        match self.check_future_timestamp(trimmed, now) {
            Ok(_) => Sanitized::Accepted(trimmed.to_string()),
            Err(reason) => Sanitized::Rejected(reason),
        }
    }

    /// The `is_expired` value to publish for a stored value, if any.
    pub fn derive_expiry_field(&self, stored: &str, now: DateTime<Utc>) -> Option<bool> {
        self.is_expired(stored, now).as_flag()
    }
}
