//! Date normalization for bank statement cells.
//!
//! Statements mix `DD/MM/YYYY` and `MM/DD/YYYY`. Day-first is always tried
//! before month-first, so an ambiguous `06/10/2025` reads as 6 October.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Normalized value-date format.
pub const VALUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalized posted-date format.
pub const POSTED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Earliest accepted year. `%Y` also matches two-digit years (`24` as 0024),
/// which are rejected rather than guessed.
const MIN_YEAR: i32 = 1900;

const DATE_PATTERNS: [&str; 3] = ["%d/%m/%Y", "%m/%d/%Y", "%Y-%m-%d"];

const DATE_TIME_PATTERNS: [&str; 6] = [
    "%d/%m/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a value date.
#[must_use]
pub fn parse_value_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_PATTERNS
        .iter()
        .filter_map(|pattern| NaiveDate::parse_from_str(trimmed, pattern).ok())
        .find(|date| date.year() >= MIN_YEAR)
}

/// Parses a posted date with a time-of-day suffix.
///
/// A bare date (no time) is accepted as midnight.
#[must_use]
pub fn parse_posted_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_TIME_PATTERNS
        .iter()
        .filter_map(|pattern| NaiveDateTime::parse_from_str(trimmed, pattern).ok())
        .find(|date| date.year() >= MIN_YEAR)
        .or_else(|| parse_value_date(trimmed).map(|date| date.and_time(NaiveTime::MIN)))
}

/// Formats a value date as `YYYY-MM-DD`.
#[must_use]
pub fn format_value_date(date: NaiveDate) -> String {
    date.format(VALUE_DATE_FORMAT).to_string()
}

/// Formats a posted date as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_posted_date(date: NaiveDateTime) -> String {
    date.format(POSTED_DATE_FORMAT).to_string()
}

/// Serde adapters emitting the normalized string forms.
pub mod serde_format {
    /// `Option<NaiveDate>` as `YYYY-MM-DD` or null.
    pub mod value_date {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes the date.
        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => serializer.serialize_str(&super::super::format_value_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes the date, accepting any supported input pattern.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map_or(Ok(None), |text| {
                super::super::parse_value_date(&text)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}")))
            })
        }
    }

    /// `Option<NaiveDateTime>` as `YYYY-MM-DD HH:MM:SS` or null.
    pub mod posted_date {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serializes the timestamp.
        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => serializer.serialize_str(&super::super::format_posted_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes the timestamp, accepting any supported input pattern.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map_or(Ok(None), |text| {
                super::super::parse_posted_date(&text)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}")))
            })
        }
    }
}
