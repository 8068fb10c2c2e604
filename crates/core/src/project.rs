//! Projects and their CAPX, OPX and BD-expenditure line items.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::round_currency;

/// Project validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Project id is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid project id '{0}': use letters, digits, '-' or '_'")]
    InvalidId(String),

    /// A required text field is empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// A currency figure is negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// End date precedes start date.
    #[error("end date {end} is before start date {start}")]
    DateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// In progress.
    #[default]
    Active,
    /// Paused.
    OnHold,
    /// Delivered.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// Stored code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Editable project fields (create and update body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    /// Display name.
    pub name: String,
    /// Client or customer name.
    #[serde(default)]
    pub client: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// End date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Contract value.
    #[serde(default)]
    pub budget: Decimal,
}

impl ProjectDetails {
    /// Trims text, rounds the budget and checks the date range.
    pub fn validate(self) -> Result<Self, ProjectError> {
        let name = required("name", &self.name)?;

        if self.budget < Decimal::ZERO {
            return Err(ProjectError::NegativeAmount {
                field: "budget",
                value: self.budget,
            });
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && end < start
        {
            return Err(ProjectError::DateRange { start, end });
        }

        Ok(Self {
            name,
            client: optional(self.client),
            description: optional(self.description),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: round_currency(self.budget),
        })
    }
}

/// Create-project body: a caller-chosen id plus the editable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    /// Project id, e.g. `PRJ-001`.
    pub id: String,
    /// Editable fields.
    #[serde(flatten)]
    pub details: ProjectDetails,
}

impl NewProject {
    /// Validates id and fields.
    pub fn validate(self) -> Result<Self, ProjectError> {
        let id = self.id.trim().to_string();
        let id_ok = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !id_ok {
            return Err(ProjectError::InvalidId(self.id));
        }

        Ok(Self {
            id,
            details: self.details.validate()?,
        })
    }
}

/// Which ledger a project line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Capital expenditure.
    Capx,
    /// Operating expenditure.
    Opx,
}

impl LineKind {
    /// Path segment and stored code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capx => "capx",
            Self::Opx => "opx",
        }
    }
}

/// CAPX or OPX line item body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// What was bought or paid for.
    pub item: String,
    /// Amount.
    pub amount: Decimal,
    /// Vendor or payee.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Date incurred.
    #[serde(default)]
    pub incurred_on: Option<NaiveDate>,
}

impl LineItemInput {
    /// Trims text, rounds the amount and rejects negatives.
    pub fn validate(self) -> Result<Self, ProjectError> {
        Ok(Self {
            item: required("item", &self.item)?,
            amount: non_negative("amount", self.amount)?,
            vendor: optional(self.vendor),
            incurred_on: self.incurred_on,
        })
    }
}

/// Business-development expenditure fields. The receipt is attached
/// separately and is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdExpenditureInput {
    /// Purpose of the spend.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Date incurred.
    #[serde(default)]
    pub spent_on: Option<NaiveDate>,
}

impl BdExpenditureInput {
    /// Trims text, rounds the amount and rejects negatives.
    pub fn validate(self) -> Result<Self, ProjectError> {
        Ok(Self {
            description: required("description", &self.description)?,
            amount: non_negative("amount", self.amount)?,
            spent_on: self.spent_on,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ProjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ProjectError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, ProjectError> {
    if value < Decimal::ZERO {
        return Err(ProjectError::NegativeAmount { field, value });
    }
    Ok(round_currency(value))
}
