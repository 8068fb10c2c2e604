//! Sales-quarter KPIs.
//!
//! One record per quarter label: four channel figures, a target, a forecast
//! and two independent percentages (hit and achieved), each bounded to
//! `[0, 100]`. Records are validated here before any persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::round_currency;
use crate::quarter::{Quarter, QuarterParseError};

/// Largest accepted percentage.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Sales-quarter validation errors.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Quarter label not recognized.
    #[error(transparent)]
    InvalidQuarter(#[from] QuarterParseError),

    /// A currency figure is negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeFigure {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A percentage is outside `[0, 100]`.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentageOutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },
}

/// Sales-quarter payload as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesQuarterInput {
    /// Quarter label (`Mar-May` or `Q1` style).
    pub quarter: String,
    /// Direct sales.
    #[serde(default)]
    pub direct_sales: Decimal,
    /// Institutional sales.
    #[serde(default)]
    pub institutional_sales: Decimal,
    /// Channel-partner sales.
    #[serde(default)]
    pub channel_sales: Decimal,
    /// Online sales.
    #[serde(default)]
    pub online_sales: Decimal,
    /// Sales target.
    #[serde(default)]
    pub target: Decimal,
    /// Forecasted sales.
    #[serde(default)]
    pub forecasted_sales: Decimal,
    /// Hit percentage.
    #[serde(default)]
    pub hit_percentage: Decimal,
    /// Achieved percentage.
    #[serde(default)]
    pub achieved_percentage: Decimal,
}

/// A validated sales-quarter record ready for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSalesQuarter {
    /// Quarter.
    pub quarter: Quarter,
    /// Direct sales.
    pub direct_sales: Decimal,
    /// Institutional sales.
    pub institutional_sales: Decimal,
    /// Channel-partner sales.
    pub channel_sales: Decimal,
    /// Online sales.
    pub online_sales: Decimal,
    /// Sales target.
    pub target: Decimal,
    /// Forecasted sales.
    pub forecasted_sales: Decimal,
    /// Hit percentage in `[0, 100]`.
    pub hit_percentage: Decimal,
    /// Achieved percentage in `[0, 100]`.
    pub achieved_percentage: Decimal,
}

impl NewSalesQuarter {
    /// Sum of the four channels.
    #[must_use]
    pub fn total_sales(&self) -> Decimal {
        self.direct_sales + self.institutional_sales + self.channel_sales + self.online_sales
    }
}

impl SalesQuarterInput {
    /// Validates the payload. Nothing is persisted for a rejected record.
    pub fn validate(&self) -> Result<NewSalesQuarter, SalesError> {
        let quarter: Quarter = self.quarter.parse()?;

        Ok(NewSalesQuarter {
            quarter,
            direct_sales: figure("direct_sales", self.direct_sales)?,
            institutional_sales: figure("institutional_sales", self.institutional_sales)?,
            channel_sales: figure("channel_sales", self.channel_sales)?,
            online_sales: figure("online_sales", self.online_sales)?,
            target: figure("target", self.target)?,
            forecasted_sales: figure("forecasted_sales", self.forecasted_sales)?,
            hit_percentage: percentage("hit_percentage", self.hit_percentage)?,
            achieved_percentage: percentage("achieved_percentage", self.achieved_percentage)?,
        })
    }
}

fn figure(field: &'static str, value: Decimal) -> Result<Decimal, SalesError> {
    if value < Decimal::ZERO {
        return Err(SalesError::NegativeFigure { field, value });
    }
    Ok(round_currency(value))
}

fn percentage(field: &'static str, value: Decimal) -> Result<Decimal, SalesError> {
    if value < Decimal::ZERO || value > MAX_PERCENTAGE {
        return Err(SalesError::PercentageOutOfRange { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input(hit: Decimal, achieved: Decimal) -> SalesQuarterInput {
        SalesQuarterInput {
            quarter: "Mar-May".to_string(),
            direct_sales: dec!(1000),
            institutional_sales: dec!(2000),
            channel_sales: dec!(500),
            online_sales: dec!(250.555),
            target: dec!(5000),
            forecasted_sales: dec!(4500),
            hit_percentage: hit,
            achieved_percentage: achieved,
        }
    }

    #[test]
    fn test_valid_record() {
        let record = input(dec!(80), dec!(75.5)).validate().expect("should validate");
        assert_eq!(record.quarter, Quarter::MarMay);
        assert_eq!(record.online_sales, dec!(250.56));
        assert_eq!(record.total_sales(), dec!(3750.56));
        assert_eq!(record.achieved_percentage, dec!(75.5));
    }

    #[test]
    fn test_record_serializes_quarter_label() {
        let record = input(dec!(80), dec!(75)).validate().expect("should validate");
        let json = serde_json::to_value(&record).expect("should serialize");
        assert_eq!(json["quarter"], "Mar-May");
    }

    #[rstest]
    #[case(dec!(150), dec!(50), "hit_percentage")]
    #[case(dec!(-1), dec!(50), "hit_percentage")]
    #[case(dec!(50), dec!(100.01), "achieved_percentage")]
    fn test_percentage_out_of_range(
        #[case] hit: Decimal,
        #[case] achieved: Decimal,
        #[case] expected_field: &str,
    ) {
        let err = input(hit, achieved).validate().unwrap_err();
        match err {
            SalesError::PercentageOutOfRange { field, .. } => assert_eq!(field, expected_field),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(input(dec!(0), dec!(100)).validate().is_ok());
    }

    #[test]
    fn test_negative_figure() {
        let mut payload = input(dec!(10), dec!(10));
        payload.target = dec!(-1);
        assert!(matches!(
            payload.validate().unwrap_err(),
            SalesError::NegativeFigure { field: "target", .. }
        ));
    }

    #[test]
    fn test_unknown_quarter() {
        let mut payload = input(dec!(10), dec!(10));
        payload.quarter = "Spring".to_string();
        assert!(matches!(
            payload.validate().unwrap_err(),
            SalesError::InvalidQuarter(_)
        ));
    }

    #[test]
    fn test_json_defaults_missing_figures() {
        let payload: SalesQuarterInput =
            serde_json::from_str(r#"{"quarter": "Q2", "hit_percentage": "42.5"}"#)
                .expect("should deserialize");
        let record = payload.validate().expect("should validate");
        assert_eq!(record.quarter, Quarter::JunAug);
        assert_eq!(record.hit_percentage, dec!(42.5));
        assert_eq!(record.direct_sales, Decimal::ZERO);
    }

    proptest! {
        /// Any percentage outside [0, 100] is rejected; any inside is kept.
        #[test]
        fn prop_percentage_bounds(basis_points in -50_000i64..50_000) {
            let value = Decimal::new(basis_points, 2);
            let result = input(value, dec!(50)).validate();
            if value >= Decimal::ZERO && value <= MAX_PERCENTAGE {
                prop_assert_eq!(result.expect("in range").hit_percentage, value);
            } else {
                let rejected = matches!(result, Err(SalesError::PercentageOutOfRange { .. }));
                prop_assert!(rejected);
            }
        }
    }
}
