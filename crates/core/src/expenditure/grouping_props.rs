//! Property tests for grouping and the export/import round trip.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::quarter::{Quarter, QuarterTag};

fn quarter_strategy() -> impl Strategy<Value = QuarterTag> {
    prop_oneof![
        Just(QuarterTag::AllQuarters),
        (0usize..4).prop_map(|i| QuarterTag::Quarter(Quarter::ALL[i])),
    ]
}

prop_compose! {
    fn row_strategy()(
        id in 1i32..10_000,
        category in prop::sample::select(vec!["Rent", "Utilities", "Travel", "rent", "Payroll"]),
        item in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
        paise in 0i64..1_000_000_000,
        quarter in quarter_strategy(),
    ) -> ExpenditureRow {
        ExpenditureRow {
            id,
            category: category.to_string(),
            item_name: item,
            amount: Decimal::new(paise, 2),
            quarter,
        }
    }
}

proptest! {
    /// Grouping is deterministic.
    #[test]
    fn prop_grouping_idempotent(rows in prop::collection::vec(row_strategy(), 0..40)) {
        prop_assert_eq!(group_by_category(&rows), group_by_category(&rows));
    }

    /// Categories are unique and appear in first-seen order; no item is lost.
    #[test]
    fn prop_grouping_first_seen_order(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let grouped = group_by_category(&rows);

        let mut expected_order: Vec<&str> = Vec::new();
        for row in &rows {
            if !expected_order.contains(&row.category.as_str()) {
                expected_order.push(row.category.as_str());
            }
        }
        let actual_order: Vec<&str> = grouped.iter().map(|g| g.category.as_str()).collect();
        prop_assert_eq!(actual_order, expected_order);

        let item_count: usize = grouped.iter().map(|g| g.items.len()).sum();
        prop_assert_eq!(item_count, rows.len());

        for group in &grouped {
            let ids: Vec<i32> = group.items.iter().map(|i| i.id).collect();
            let expected: Vec<i32> = rows
                .iter()
                .filter(|r| r.category == group.category)
                .map(|r| r.id)
                .collect();
            prop_assert_eq!(ids, expected);
        }
    }

    /// Grand total equals the sum of every row.
    #[test]
    fn prop_grand_total_matches_rows(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let expected: Decimal = rows.iter().map(|r| r.amount).sum();
        prop_assert_eq!(totals(&group_by_category(&rows)).grand_total, expected);
    }

    /// Export cells re-import to the same flat set.
    #[test]
    fn prop_export_import_round_trip(rows in prop::collection::vec(row_strategy(), 1..25)) {
        let grouped = group_by_category(&rows);
        let reimported = import_sheet(&export_cells(&grouped)).expect("should import");

        let expected: Vec<(String, String, Decimal, QuarterTag)> = grouped
            .iter()
            .flat_map(|g| {
                g.items
                    .iter()
                    .map(|i| (g.category.clone(), i.name.clone(), i.amount, i.quarter))
            })
            .collect();
        let actual: Vec<(String, String, Decimal, QuarterTag)> = reimported
            .into_iter()
            .map(|e| (e.category, e.item_name, e.amount, e.quarter))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
