//! Expenditure types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{parse_currency, round_currency};
use crate::quarter::QuarterTag;

use super::error::ExpenditureError;

/// An amount as sent by clients: a JSON number or a display string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Plain JSON number.
    Number(serde_json::Number),
    /// Currency text such as `₹1,500`.
    Text(String),
}

impl RawAmount {
    /// Coerces to a decimal. Anything unparsable is zero.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Self::Number(number) => {
                let text = number.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .unwrap_or(Decimal::ZERO)
            }
            Self::Text(text) => parse_currency(text),
        }
    }
}

/// One category of an import payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportCategory {
    /// Category name.
    pub category: String,
    /// Items in the category.
    #[serde(default)]
    pub items: Vec<ImportItem>,
}

/// One item of an import payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportItem {
    /// Item name.
    #[serde(alias = "item_name", alias = "item")]
    pub name: String,
    /// Amount, numeric or currency text.
    pub amount: RawAmount,
    /// Quarter label; absent means all quarters.
    #[serde(default)]
    pub quarter: Option<String>,
}

/// A validated expenditure ready for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpenditure {
    /// Grouping key, case-sensitive.
    pub category: String,
    /// Item name.
    pub item_name: String,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Quarter tag.
    pub quarter: QuarterTag,
}

impl NewExpenditure {
    /// Trims names, rounds the amount to paise and rejects blanks and
    /// negative amounts.
    pub fn new(
        category: &str,
        item_name: &str,
        amount: Decimal,
        quarter: QuarterTag,
    ) -> Result<Self, ExpenditureError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ExpenditureError::BlankCategory);
        }

        let changes = ItemChanges::new(category, item_name, amount, quarter)?;
        Ok(Self {
            category: category.to_string(),
            item_name: changes.item_name,
            amount: changes.amount,
            quarter: changes.quarter,
        })
    }
}

/// Replacement values for one stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    /// New item name.
    pub item_name: String,
    /// New amount.
    pub amount: Decimal,
    /// New quarter.
    pub quarter: QuarterTag,
}

impl ItemChanges {
    fn new(
        category: &str,
        item_name: &str,
        amount: Decimal,
        quarter: QuarterTag,
    ) -> Result<Self, ExpenditureError> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            return Err(ExpenditureError::BlankItemName {
                category: category.to_string(),
            });
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ExpenditureError::NegativeAmount {
                item: item_name.to_string(),
                amount,
            });
        }

        Ok(Self {
            item_name: item_name.to_string(),
            amount: round_currency(amount),
            quarter,
        })
    }
}

/// Body of an item update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedItem {
    /// New item name.
    #[serde(alias = "item_name")]
    pub name: String,
    /// New amount.
    pub amount: RawAmount,
    /// New quarter; absent means all quarters.
    #[serde(default)]
    pub quarter: Option<String>,
}

impl UpdatedItem {
    /// Validates into replacement values.
    pub fn validate(&self) -> Result<ItemChanges, ExpenditureError> {
        let quarter = QuarterTag::parse_optional(self.quarter.as_deref())?;
        ItemChanges::new("", &self.name, self.amount.to_decimal(), quarter)
    }
}

/// A stored expenditure row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenditureRow {
    /// Row id.
    pub id: i32,
    /// Category.
    pub category: String,
    /// Item name.
    pub item_name: String,
    /// Amount.
    pub amount: Decimal,
    /// Quarter tag.
    pub quarter: QuarterTag,
}

/// Items of one category, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Category name.
    pub category: String,
    /// Items in first-seen order.
    pub items: Vec<GroupedItem>,
}

impl CategoryGroup {
    /// Sum of item amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }
}

/// One item inside a [`CategoryGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedItem {
    /// Row id.
    pub id: i32,
    /// Item name.
    pub name: String,
    /// Amount.
    pub amount: Decimal,
    /// Quarter tag.
    pub quarter: QuarterTag,
}
