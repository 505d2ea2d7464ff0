//! Host time zone.
//!
//! Canonical timestamps carry no offset; they are read in the zone the host
//! is configured with. The host exposes that zone as a fixed UTC offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("invalid time zone '{0}': expected UTC, Z or +HH:MM / -HH:MM")]
    Invalid(String),

    #[error("time zone offset '{0}' is out of range")]
    OutOfRange(String),
}

/// The host's configured zone, as a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTimeZone {
    offset: FixedOffset,
}

impl HostTimeZone {
    pub fn utc() -> Self {
        Self::from_offset(Utc.fix())
    }

    pub fn from_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolve a wall-clock time in this zone to an instant.
    ///
    /// Returns `None` only when the local time does not map to exactly one
    /// instant, which never happens for a fixed offset.
    pub fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for HostTimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl FromStr for HostTimeZone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Self::utc());
        }

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(ZoneError::Invalid(s.to_string())),
        };
        let (hours, minutes) = rest
            .split_once(':')
            .ok_or_else(|| ZoneError::Invalid(s.to_string()))?;
        let two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hours) || !two_digits(minutes) {
            return Err(ZoneError::Invalid(s.to_string()));
        }
        let hours: i32 = hours.parse().map_err(|_| ZoneError::Invalid(s.to_string()))?;
        let minutes: i32 = minutes
            .parse()
            .map_err(|_| ZoneError::Invalid(s.to_string()))?;
        if minutes >= 60 {
            return Err(ZoneError::OutOfRange(s.to_string()));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::from_offset)
            .ok_or_else(|| ZoneError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for HostTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset.local_minus_utc() == 0 {
            f.write_str("UTC")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

impl Serialize for HostTimeZone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HostTimeZone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::utc("UTC", 0)]
    #[case::lower_utc("utc", 0)]
    #[case::zulu("Z", 0)]
    #[case::tokyo("+09:00", 9 * 3600)]
    #[case::newfoundland("-03:30", -(3 * 3600 + 30 * 60))]
    fn parses_supported_forms(#[case] input: &str, #[case] seconds: i32) {
        let zone: HostTimeZone = input.parse().unwrap();
        assert_eq!(zone.offset().local_minus_utc(), seconds);
    }

    #[rstest]
    #[case::name("Asia/Tokyo")]
    #[case::no_sign("09:00")]
    #[case::short("+9:00")]
    #[case::no_colon("+0900")]
    #[case::empty("")]
    fn rejects_unsupported_forms(#[case] input: &str) {
        assert!(matches!(
            input.parse::<HostTimeZone>(),
            Err(ZoneError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(matches!(
            "+25:00".parse::<HostTimeZone>(),
            Err(ZoneError::OutOfRange(_))
        ));
        assert!(matches!(
            "+01:75".parse::<HostTimeZone>(),
            Err(ZoneError::OutOfRange(_))
        ));
    }

    #[test]
    fn resolve_applies_offset() {
        let zone: HostTimeZone = "+09:00".parse().unwrap();
        let local = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let instant = zone.resolve(local).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for input in ["UTC", "+09:00", "-03:30"] {
            let zone: HostTimeZone = input.parse().unwrap();
            assert_eq!(zone.to_string().parse::<HostTimeZone>().unwrap(), zone);
        }
    }
}
