//! Expenditure import, grouping and export tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::quarter::{Quarter, QuarterFilter, QuarterTag};
use crate::spreadsheet::Cell;

fn row(id: i32, category: &str, item: &str, amount: Decimal, quarter: QuarterTag) -> ExpenditureRow {
    ExpenditureRow {
        id,
        category: category.to_string(),
        item_name: item.to_string(),
        amount,
        quarter,
    }
}

const Q1: QuarterTag = QuarterTag::Quarter(Quarter::MarMay);
const Q2: QuarterTag = QuarterTag::Quarter(Quarter::JunAug);

#[test]
fn test_grouping_first_seen_order() {
    let rows = vec![
        row(1, "Rent", "Office", dec!(100), Q1),
        row(2, "Utilities", "Power", dec!(50), Q1),
        row(3, "Rent", "Warehouse", dec!(200), Q2),
    ];

    let grouped = group_by_category(&rows);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].category, "Rent");
    assert_eq!(
        grouped[0].items.iter().map(|i| i.amount).collect::<Vec<_>>(),
        vec![dec!(100), dec!(200)]
    );
    assert_eq!(grouped[1].category, "Utilities");
    assert_eq!(grouped[1].items[0].amount, dec!(50));
    assert_eq!(grouped[1].items[0].id, 2);

    assert_eq!(group_by_category(&rows), grouped);
}

#[test]
fn test_grouping_is_case_sensitive() {
    let rows = vec![
        row(1, "Rent", "a", dec!(1), Q1),
        row(2, "rent", "b", dec!(1), Q1),
    ];
    assert_eq!(group_by_category(&rows).len(), 2);
}

#[test]
fn test_totals() {
    let rows = vec![
        row(1, "Rent", "Office", dec!(100.25), Q1),
        row(2, "Utilities", "Power", dec!(50), Q1),
        row(3, "Rent", "Warehouse", dec!(200), Q2),
    ];

    let summary = totals(&group_by_category(&rows));
    assert_eq!(summary.categories[0].category, "Rent");
    assert_eq!(summary.categories[0].total, dec!(300.25));
    assert_eq!(summary.categories[1].total, dec!(50));
    assert_eq!(summary.grand_total, dec!(350.25));

    assert_eq!(totals(&[]).grand_total, Decimal::ZERO);
}

#[test]
fn test_flatten_import_payload() {
    let payload: Vec<ImportCategory> = serde_json::from_str(
        r#"[
            {"category": "Rent", "items": [
                {"name": "Office", "amount": "₹1,25,000", "quarter": "Mar-May"},
                {"name": "Warehouse", "amount": 5000.5}
            ]},
            {"category": "Travel", "items": [
                {"item_name": "Flights", "amount": "n/a", "quarter": "Q3"}
            ]}
        ]"#,
    )
    .expect("should deserialize");

    let rows = flatten_import(&payload).expect("should flatten");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].amount, dec!(125000));
    assert_eq!(rows[0].quarter, Q1);
    assert_eq!(rows[1].amount, dec!(5000.5));
    assert_eq!(rows[1].quarter, QuarterTag::AllQuarters);
    assert_eq!(rows[2].category, "Travel");
    assert_eq!(rows[2].item_name, "Flights");
    assert_eq!(rows[2].amount, Decimal::ZERO);
    assert_eq!(rows[2].quarter, QuarterTag::Quarter(Quarter::SepNov));
}

#[test]
fn test_flatten_rejects_bad_items() {
    let parse = |json: &str| -> Vec<ImportCategory> { serde_json::from_str(json).expect("json") };

    let err = flatten_import(&parse(r#"[{"category": " ", "items": []}]"#)).unwrap_err();
    assert!(matches!(err, ExpenditureError::BlankCategory));

    let err =
        flatten_import(&parse(r#"[{"category": "Rent", "items": [{"name": "", "amount": 1}]}]"#))
            .unwrap_err();
    assert!(matches!(err, ExpenditureError::BlankItemName { .. }));

    let err = flatten_import(&parse(
        r#"[{"category": "Rent", "items": [{"name": "a", "amount": -5}]}]"#,
    ))
    .unwrap_err();
    assert!(matches!(err, ExpenditureError::NegativeAmount { .. }));

    let err = flatten_import(&parse(
        r#"[{"category": "Rent", "items": [{"name": "a", "amount": 1, "quarter": "Winter"}]}]"#,
    ))
    .unwrap_err();
    assert!(matches!(err, ExpenditureError::InvalidQuarter(_)));

    let err = flatten_import(&parse(r#"[{"category": "Rent", "items": []}]"#)).unwrap_err();
    assert!(matches!(err, ExpenditureError::EmptyImport));
}

#[test]
fn test_updated_item_validation() {
    let item: UpdatedItem =
        serde_json::from_str(r#"{"name": " Office ", "amount": "₹2,000", "quarter": "Dec-Feb"}"#)
            .expect("should deserialize");
    let changes = item.validate().expect("should validate");
    assert_eq!(changes.item_name, "Office");
    assert_eq!(changes.amount, dec!(2000));
    assert_eq!(changes.quarter, QuarterTag::Quarter(Quarter::DecFeb));

    let item: UpdatedItem =
        serde_json::from_str(r#"{"name": "Office", "amount": 10}"#).expect("should deserialize");
    assert_eq!(
        item.validate().expect("should validate").quarter,
        QuarterTag::AllQuarters
    );
}

#[test]
fn test_export_cells_layout() {
    let rows = vec![
        row(1, "Rent", "Office", dec!(125000), Q1),
        row(2, "Utilities", "Power", dec!(1234.5), QuarterTag::AllQuarters),
    ];

    let cells = export_cells(&group_by_category(&rows));
    assert_eq!(
        cells,
        vec![
            vec![
                Cell::text("Category"),
                Cell::text("Item"),
                Cell::text("Amount"),
                Cell::text("Quarter"),
            ],
            vec![
                Cell::text("Rent"),
                Cell::text("Office"),
                Cell::text("₹1,25,000"),
                Cell::text("Mar-May"),
            ],
            vec![
                Cell::text("Utilities"),
                Cell::text("Power"),
                Cell::text("₹1,234.50"),
                Cell::text("All Quarters"),
            ],
        ]
    );
}

#[test]
fn test_export_filename() {
    assert_eq!(
        export_filename(QuarterFilter::All),
        "expenditures_All_Quarters.xlsx"
    );
    assert_eq!(
        export_filename(QuarterFilter::Only(Quarter::SepNov)),
        "expenditures_Sep-Nov.xlsx"
    );
}

#[test]
fn test_export_then_import_workbook() {
    let rows = vec![
        row(1, "Rent", "Office", dec!(125000), Q1),
        row(2, "Utilities", "Power", dec!(1234.5), QuarterTag::AllQuarters),
        row(3, "Rent", "Warehouse", dec!(99.99), Q2),
    ];

    let file = export_workbook(&group_by_category(&rows), QuarterFilter::All)
        .expect("should export");
    let imported = import_workbook(&file.bytes).expect("should import");

    let flat: Vec<(String, String, Decimal, QuarterTag)> = imported
        .into_iter()
        .map(|e| (e.category, e.item_name, e.amount, e.quarter))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("Rent".to_string(), "Office".to_string(), dec!(125000), Q1),
            ("Rent".to_string(), "Warehouse".to_string(), dec!(99.99), Q2),
            (
                "Utilities".to_string(),
                "Power".to_string(),
                dec!(1234.5),
                QuarterTag::AllQuarters
            ),
        ]
    );
}

#[test]
fn test_import_sheet_missing_columns() {
    let rows = vec![vec![Cell::text("Category"), Cell::text("Quarter")]];
    let err = import_sheet(&rows).unwrap_err();
    assert_eq!(err.to_string(), "missing column Item, Amount");
}

#[test]
fn test_import_sheet_reports_row_number() {
    let rows = vec![
        vec![Cell::text("Category"), Cell::text("Item"), Cell::text("Amount")],
        vec![Cell::text("Rent"), Cell::text("Office"), Cell::text("100")],
        vec![Cell::Empty, Cell::Empty, Cell::Empty],
        vec![Cell::text("Rent"), Cell::Empty, Cell::Number(dec!(5))],
    ];

    let err = import_sheet(&rows).unwrap_err();
    match err {
        ExpenditureError::InvalidRow { row, .. } => assert_eq!(row, 4),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_import_sheet_without_quarter_column() {
    let rows = vec![
        vec![Cell::text("category"), Cell::text("ITEM"), Cell::text("Amount")],
        vec![Cell::text("Rent"), Cell::text("Office"), Cell::Number(dec!(100))],
    ];

    let imported = import_sheet(&rows).expect("should import");
    assert_eq!(imported[0].quarter, QuarterTag::AllQuarters);
    assert_eq!(imported[0].amount, dec!(100));
}

#[test]
fn test_import_header_only_sheet() {
    let rows: Vec<Vec<Cell>> = vec![EXPORT_HEADER.iter().map(|h| Cell::text(*h)).collect()];
    assert!(matches!(
        import_sheet(&rows).unwrap_err(),
        ExpenditureError::EmptyImport
    ));
}
