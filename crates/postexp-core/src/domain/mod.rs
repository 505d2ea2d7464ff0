//! Domain model (timestamps, expiry results, sanitizer outcomes, posts).

pub mod errors;
pub mod expiry;
pub mod ids;
pub mod post;
pub mod sanitized;
pub mod timestamp;
pub mod zone;

pub use self::errors::{RejectReason, UnparsableTimestamp};
pub use self::expiry::ExpiryResult;
pub use self::ids::PostId;
pub use self::post::{Post, PostStatus};
pub use self::sanitized::Sanitized;
pub use self::timestamp::{CANONICAL_FORMAT, CANONICAL_PATTERN, ExpirationTimestamp, format_canonical};
pub use self::zone::{HostTimeZone, ZoneError};
