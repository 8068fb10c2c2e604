//! Business quarter labels.
//!
//! Quarters are fixed three-month business periods, not calendar quarters.
//! Canonical labels are the month ranges; `Q1`..`Q4` are accepted as aliases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Label meaning "no quarter filter" / "applies to every quarter".
pub const ALL_QUARTERS: &str = "All Quarters";

/// Error for an unrecognized quarter label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quarter '{0}', expected one of Mar-May, Jun-Aug, Sep-Nov, Dec-Feb or All Quarters")]
pub struct QuarterParseError(pub String);

/// A business quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    /// March to May.
    MarMay,
    /// June to August.
    JunAug,
    /// September to November.
    SepNov,
    /// December to February.
    DecFeb,
}

impl Quarter {
    /// All quarters in business-year order.
    pub const ALL: [Self; 4] = [Self::MarMay, Self::JunAug, Self::SepNov, Self::DecFeb];

    /// Canonical display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarMay => "Mar-May",
            Self::JunAug => "Jun-Aug",
            Self::SepNov => "Sep-Nov",
            Self::DecFeb => "Dec-Feb",
        }
    }

    /// Short alias (`Q1`..`Q4`).
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::MarMay => "Q1",
            Self::JunAug => "Q2",
            Self::SepNov => "Q3",
            Self::DecFeb => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = QuarterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(wanted) || q.alias().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuarterParseError(s.to_string()))
    }
}

impl Serialize for Quarter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Quarter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The quarter an expenditure item is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuarterTag {
    /// A single quarter.
    Quarter(Quarter),
    /// Applies to every quarter.
    #[default]
    AllQuarters,
}

impl QuarterTag {
    /// Display label stored in the database.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quarter(q) => q.label(),
            Self::AllQuarters => ALL_QUARTERS,
        }
    }

    /// Parses an optional label; absent or blank means all quarters.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, QuarterParseError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::AllQuarters),
            Some(label) => label.parse(),
        }
    }
}

impl fmt::Display for QuarterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuarterTag {
    type Err = QuarterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_QUARTERS) {
            Ok(Self::AllQuarters)
        } else {
            s.parse().map(Self::Quarter)
        }
    }
}

impl Serialize for QuarterTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for QuarterTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Read-side filter for expenditure listings and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuarterFilter {
    /// No filter.
    #[default]
    All,
    /// Exact quarter-label match.
    Only(Quarter),
}

impl QuarterFilter {
    /// Parses the `quarter` query parameter. Absent, blank, or
    /// `All Quarters` means unfiltered.
    pub fn from_query(raw: Option<&str>) -> Result<Self, QuarterParseError> {
        match QuarterTag::parse_optional(raw)? {
            QuarterTag::AllQuarters => Ok(Self::All),
            QuarterTag::Quarter(q) => Ok(Self::Only(q)),
        }
    }

    /// The label this filter stands for.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_QUARTERS,
            Self::Only(q) => q.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mar-May", Quarter::MarMay)]
    #[case("jun-aug", Quarter::JunAug)]
    #[case(" Sep-Nov ", Quarter::SepNov)]
    #[case("Q4", Quarter::DecFeb)]
    #[case("q1", Quarter::MarMay)]
    fn test_parse_quarter(#[case] raw: &str, #[case] expected: Quarter) {
        assert_eq!(raw.parse::<Quarter>().expect("should parse"), expected);
    }

    #[test]
    fn test_unknown_quarter() {
        let err = "Jan-Mar".parse::<Quarter>().unwrap_err();
        assert_eq!(err, QuarterParseError("Jan-Mar".to_string()));
    }

    #[test]
    fn test_tag_defaults_to_all_quarters() {
        assert_eq!(QuarterTag::parse_optional(None).unwrap(), QuarterTag::AllQuarters);
        assert_eq!(QuarterTag::parse_optional(Some("  ")).unwrap(), QuarterTag::AllQuarters);
        assert_eq!(
            QuarterTag::parse_optional(Some("All Quarters")).unwrap(),
            QuarterTag::AllQuarters
        );
        assert_eq!(
            QuarterTag::parse_optional(Some("Q2")).unwrap(),
            QuarterTag::Quarter(Quarter::JunAug)
        );
    }

    #[test]
    fn test_tag_serde_uses_labels() {
        let json = serde_json::to_string(&QuarterTag::Quarter(Quarter::SepNov)).unwrap();
        assert_eq!(json, "\"Sep-Nov\"");

        let tag: QuarterTag = serde_json::from_str("\"All Quarters\"").unwrap();
        assert_eq!(tag, QuarterTag::AllQuarters);

        assert!(serde_json::from_str::<QuarterTag>("\"Winter\"").is_err());
    }

    #[test]
    fn test_quarter_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Quarter::DecFeb).unwrap(), "\"Dec-Feb\"");

        let quarter: Quarter = serde_json::from_str("\"Q2\"").unwrap();
        assert_eq!(quarter, Quarter::JunAug);

        assert!(serde_json::from_str::<Quarter>("\"All Quarters\"").is_err());
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(QuarterFilter::from_query(None).unwrap(), QuarterFilter::All);
        assert_eq!(
            QuarterFilter::from_query(Some("All Quarters")).unwrap(),
            QuarterFilter::All
        );
        assert_eq!(
            QuarterFilter::from_query(Some("Dec-Feb")).unwrap(),
            QuarterFilter::Only(Quarter::DecFeb)
        );
        assert!(QuarterFilter::from_query(Some("Q9")).is_err());
        assert_eq!(QuarterFilter::Only(Quarter::MarMay).label(), "Mar-May");
    }
}
