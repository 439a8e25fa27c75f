//! UTC timestamps with microsecond precision.
//!
//! [`DateTime`] is a thin wrapper over [`chrono`] pinned to UTC: values
//! constructed from different representations of the same instant compare
//! equal, and ISO-8601 text round-trips through [`DateTime::format_iso8601`]
//! and [`DateTime::parse_iso8601`].
//!
//! ## Examples
//!
//! ```rust
//! use coffer::DateTime;
//!
//! let dt = DateTime::from_epoch_millis(1_500_000_000_000).unwrap();
//! assert_eq!(dt.format_iso8601(), "2017-07-14T02:40:00.000000Z");
//! assert_eq!(DateTime::parse_iso8601(&dt.format_iso8601()), Some(dt));
//! ```

use chrono::{SecondsFormat, TimeZone, Utc};
use std::fmt;

/// An instant in time, stored as UTC with microsecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    instant: chrono::DateTime<Utc>,
}

impl DateTime {
    /// Returns the current instant.
    #[must_use]
    pub fn now() -> Self {
        DateTime { instant: Utc::now() }
    }

    /// Creates an instant from milliseconds since the Unix epoch.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    #[must_use]
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        match Utc.timestamp_millis_opt(millis) {
            chrono::LocalResult::Single(instant) => Some(DateTime { instant }),
            _ => None,
        }
    }

    /// Creates an instant from microseconds since the Unix epoch.
    #[must_use]
    pub fn from_epoch_micros(micros: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp_micros(micros)
            .map(|instant| DateTime { instant })
    }

    /// Returns milliseconds since the Unix epoch, truncating sub-millisecond
    /// precision.
    #[must_use]
    pub fn to_epoch_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// Returns microseconds since the Unix epoch.
    #[must_use]
    pub fn to_epoch_micros(&self) -> i64 {
        self.instant.timestamp_micros()
    }

    /// Formats the instant as ISO-8601 with six fractional digits and a `Z`
    /// suffix, e.g. `2017-07-14T02:40:00.000000Z`.
    #[must_use]
    pub fn format_iso8601(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
    }

    /// Parses an ISO-8601 / RFC 3339 timestamp, normalizing any offset to
    /// UTC. Returns `None` if the text is not a valid timestamp.
    #[must_use]
    pub fn parse_iso8601(text: &str) -> Option<Self> {
        chrono::DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| DateTime { instant: parsed.with_timezone(&Utc) })
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_iso8601())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instant.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_millis_round_trip() {
        let dt = DateTime::from_epoch_millis(1_500_000_000_123).unwrap();
        assert_eq!(dt.to_epoch_millis(), 1_500_000_000_123);
        assert_eq!(dt.to_epoch_micros(), 1_500_000_000_123_000);
    }

    #[test]
    fn micros_survive_where_millis_truncate() {
        let dt = DateTime::from_epoch_micros(1_500_000_000_123_456).unwrap();
        assert_eq!(dt.to_epoch_micros(), 1_500_000_000_123_456);
        assert_eq!(dt.to_epoch_millis(), 1_500_000_000_123);
    }

    #[test]
    fn formats_iso8601_with_six_fraction_digits() {
        let dt = DateTime::from_epoch_micros(1_500_000_000_123_456).unwrap();
        assert_eq!(dt.format_iso8601(), "2017-07-14T02:40:00.123456Z");
    }

    #[test]
    fn parses_offset_timestamps_to_utc() {
        let zulu = DateTime::parse_iso8601("2017-07-14T02:40:00.000000Z").unwrap();
        let offset = DateTime::parse_iso8601("2017-07-14T04:40:00+02:00").unwrap();
        assert_eq!(zulu, offset);
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(DateTime::parse_iso8601("not a date"), None);
        assert_eq!(DateTime::parse_iso8601("2017-13-40T99:00:00Z"), None);
        assert_eq!(DateTime::parse_iso8601(""), None);
    }

    #[test]
    fn ordering_follows_the_instant() {
        let earlier = DateTime::from_epoch_millis(1_000).unwrap();
        let later = DateTime::from_epoch_millis(2_000).unwrap();
        assert!(earlier < later);
    }
}
