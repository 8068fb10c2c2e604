//! Header-name column mapping.

use crate::spreadsheet::Cell;

use super::error::IngestError;

/// Fields read from a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementField {
    /// Transaction identifier (optional column).
    TransactionId,
    /// Value date.
    ValueDate,
    /// Posted date/time.
    PostedDate,
    /// Cheque number (optional column).
    ChequeNumber,
    /// Narration.
    Description,
    /// CR/DR flag.
    CrDr,
    /// Transaction amount.
    Amount,
    /// Running balance.
    Balance,
}

impl StatementField {
    /// Every field, in canonical column order.
    pub const ALL: [Self; 8] = [
        Self::TransactionId,
        Self::ValueDate,
        Self::PostedDate,
        Self::ChequeNumber,
        Self::Description,
        Self::CrDr,
        Self::Amount,
        Self::Balance,
    ];

    /// Canonical header text.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::TransactionId => "Transaction ID",
            Self::ValueDate => "Value Date",
            Self::PostedDate => "Posted Date",
            Self::ChequeNumber => "Cheque No.",
            Self::Description => "Description",
            Self::CrDr => "Cr/Dr",
            Self::Amount => "Transaction Amount",
            Self::Balance => "Available Balance",
        }
    }

    /// Accepted header spellings, compared after [`normalize_header`].
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::TransactionId => &[
                "transactionid",
                "tranid",
                "txnid",
                "transactionno",
                "referenceno",
                "refno",
            ],
            Self::ValueDate => &["valuedate", "valuedt", "value"],
            Self::PostedDate => &[
                "posteddate",
                "postdate",
                "postingdate",
                "transactiondate",
                "txndate",
                "trandate",
            ],
            Self::ChequeNumber => &[
                "chequeno",
                "chequenumber",
                "chqno",
                "cheque",
                "chequerefno",
                "chequenorefno",
                "chequerefnumber",
                "chqrefno",
            ],
            Self::Description => &[
                "description",
                "transactionremarks",
                "narration",
                "particulars",
                "remarks",
            ],
            Self::CrDr => &["crdr", "drcr", "creditdebit", "type"],
            Self::Amount => &[
                "transactionamount",
                "transactionamountinr",
                "amount",
                "amountinr",
                "amt",
            ],
            Self::Balance => &[
                "availablebalance",
                "availablebalanceinr",
                "balance",
                "runningbalance",
                "closingbalance",
                "balanceinr",
            ],
        }
    }

    /// Whether the header row must contain this column.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::TransactionId | Self::ChequeNumber)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

static BLANK: Cell = Cell::Empty;

/// Lower-cases and keeps only ASCII alphanumerics, so `Cheque No.`,
/// `cheque_no` and `CHEQUE NO` compare equal.
fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Positions of each field within a statement row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; 8],
}

impl ColumnMap {
    /// Locates each field in the header row. The first matching column wins.
    ///
    /// Fails with every missing required column named.
    pub fn from_header(header: &[Cell]) -> Result<Self, IngestError> {
        let normalized: Vec<Option<String>> = header
            .iter()
            .map(|cell| cell.as_text().map(|text| normalize_header(&text)))
            .collect();

        let mut positions = [None; 8];
        for field in StatementField::ALL {
            positions[field.index()] = normalized.iter().position(|name| {
                name.as_deref()
                    .is_some_and(|name| field.aliases().contains(&name))
            });
        }

        let missing: Vec<&'static str> = StatementField::ALL
            .into_iter()
            .filter(|field| field.is_required() && positions[field.index()].is_none())
            .map(StatementField::header)
            .collect();

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(IngestError::MissingColumns(missing))
        }
    }

    /// Column index of a field, if mapped.
    #[must_use]
    pub const fn position(&self, field: StatementField) -> Option<usize> {
        self.positions[field.index()]
    }

    /// Minimum cells a row needs to reach every mapped column.
    #[must_use]
    pub fn min_width(&self) -> usize {
        self.positions
            .iter()
            .flatten()
            .max()
            .map_or(0, |last| last + 1)
    }

    /// The cell holding `field` in `row`; blank when unmapped or out of range.
    #[must_use]
    pub fn cell<'a>(&self, row: &'a [Cell], field: StatementField) -> &'a Cell {
        self.position(field)
            .and_then(|idx| row.get(idx))
            .unwrap_or(&BLANK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|n| Cell::text(*n)).collect()
    }

    #[test]
    fn test_bank_export_header() {
        let map = ColumnMap::from_header(&header(&[
            "S No.",
            "Tran. Id",
            "Value Date",
            "Transaction Date",
            "Cheque no / Ref No",
            "Transaction Remarks",
            "CR/DR",
            "Transaction Amount(INR)",
            "Available Balance(INR)",
        ]));

        let map = map.expect("should map");
        assert_eq!(map.position(StatementField::TransactionId), Some(1));
        assert_eq!(map.position(StatementField::ValueDate), Some(2));
        assert_eq!(map.position(StatementField::PostedDate), Some(3));
        assert_eq!(map.position(StatementField::ChequeNumber), Some(4));
        assert_eq!(map.position(StatementField::Description), Some(5));
        assert_eq!(map.position(StatementField::CrDr), Some(6));
        assert_eq!(map.position(StatementField::Amount), Some(7));
        assert_eq!(map.position(StatementField::Balance), Some(8));
        assert_eq!(map.min_width(), 9);
    }

    #[test]
    fn test_reordered_columns() {
        let map = ColumnMap::from_header(&header(&[
            "Balance",
            "Amount",
            "Dr/Cr",
            "Narration",
            "Posted Date",
            "Value Date",
        ]))
        .expect("should map");

        assert_eq!(map.position(StatementField::Balance), Some(0));
        assert_eq!(map.position(StatementField::ValueDate), Some(5));
        assert_eq!(map.position(StatementField::TransactionId), None);
        assert_eq!(map.min_width(), 6);
    }

    #[test]
    fn test_missing_columns_named() {
        let err = ColumnMap::from_header(&header(&["Value Date", "Description", "Amount"]))
            .unwrap_err();

        match err {
            IngestError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["Posted Date", "Cr/Dr", "Available Balance"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_message_lists_columns() {
        let err = IngestError::MissingColumns(vec!["Posted Date", "Cr/Dr"]);
        assert_eq!(err.to_string(), "missing column Posted Date, Cr/Dr");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Cheque No."), "chequeno");
        assert_eq!(normalize_header(" value_date "), "valuedate");
        assert_eq!(normalize_header("Transaction Amount(INR)"), "transactionamountinr");
    }
}
