//! Errors - 検証エラーと読み取りエラー
//!
//! Write-time failures are reasons, not exceptions: callers decide whether to
//! surface them. Read-time failures only ever degrade to "indeterminate".

use serde::Serialize;
use thiserror::Error;

/// Why a candidate expiration value was refused at write time.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// Does not match `YYYY-MM-DD HH:MM:SS` (surrounding whitespace included).
    #[error("'{candidate}' does not match YYYY-MM-DD HH:MM:SS")]
    Format { candidate: String },

    /// Matches the layout but is not a real calendar date-time.
    #[error("'{candidate}' is not a valid calendar date-time")]
    Calendar { candidate: String },

    /// Parses, but is at or before the reference instant.
    #[error("'{candidate}' is not in the future")]
    NotInFuture { candidate: String },
}

impl RejectReason {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::Format { .. } => "format",
            RejectReason::Calendar { .. } => "calendar",
            RejectReason::NotInFuture { .. } => "not_in_future",
        }
    }

    pub fn candidate(&self) -> &str {
        match self {
            RejectReason::Format { candidate }
            | RejectReason::Calendar { candidate }
            | RejectReason::NotInFuture { candidate } => candidate,
        }
    }
}

/// A stored value that no supported layout could read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stored value '{value}' could not be parsed as a date-time")]
pub struct UnparsableTimestamp {
    pub value: String,
}
