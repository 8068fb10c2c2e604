//! Category grouping and totals.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{CategoryGroup, ExpenditureRow, GroupedItem};

/// Groups flat rows by exact category, in first-seen order.
///
/// Items keep their row order within a category. Grouping the same rows
/// twice yields identical output.
#[must_use]
pub fn group_by_category(rows: &[ExpenditureRow]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.category.as_str()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: row.category.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].items.push(GroupedItem {
            id: row.id,
            name: row.item_name.clone(),
            amount: row.amount,
            quarter: row.quarter,
        });
    }

    groups
}

/// Total of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of its items.
    pub total: Decimal,
}

/// Per-category and overall totals for a grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenditureTotals {
    /// Totals in the same order as the groups.
    pub categories: Vec<CategoryTotal>,
    /// Sum over every category.
    pub grand_total: Decimal,
}

/// Computes category totals and the grand total.
#[must_use]
pub fn totals(groups: &[CategoryGroup]) -> ExpenditureTotals {
    let categories: Vec<CategoryTotal> = groups
        .iter()
        .map(|group| CategoryTotal {
            category: group.category.clone(),
            total: group.total(),
        })
        .collect();
    let grand_total = categories.iter().map(|c| c.total).sum();

    ExpenditureTotals {
        categories,
        grand_total,
    }
}
