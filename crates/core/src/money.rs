//! Currency parsing and display.
//!
//! Amounts arrive from spreadsheets and forms as either numbers or display
//! strings such as `₹1,25,000.50`. Everything is held as `Decimal`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency glyph used for display strings.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Prefixes stripped before parsing. Longer tokens first.
const CURRENCY_PREFIXES: [&str; 6] = ["INR", "USD", "Rs.", "Rs", "₹", "$"];

/// Parses a currency string, coercing anything unparsable to zero.
///
/// ```
/// use misboard_core::money::parse_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_currency("₹1,25,000.50"), Decimal::new(12_500_050, 2));
/// assert_eq!(parse_currency("n/a"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_currency(raw: &str) -> Decimal {
    try_parse_currency(raw).unwrap_or(Decimal::ZERO)
}

/// Parses a currency string, returning `None` when it holds no number.
///
/// Accepts a leading currency glyph or code, digit-group separators, a
/// leading minus (before or after the glyph) and accounting parentheses.
#[must_use]
pub fn try_parse_currency(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (mut negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let body = match body.strip_prefix('-') {
        Some(rest) => {
            negative = !negative;
            rest
        }
        None => body,
    };

    let body = strip_currency_prefix(body);

    let body = match body.strip_prefix('-') {
        Some(rest) => {
            negative = !negative;
            rest
        }
        None => body,
    };

    let cleaned: String = body
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

fn strip_currency_prefix(value: &str) -> &str {
    let mut rest = value.trim_start();
    loop {
        let before = rest;
        for prefix in CURRENCY_PREFIXES {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped.trim_start();
            }
        }
        if rest.len() == before.len() {
            return rest;
        }
    }
}

/// Rounds an amount to two decimal places, half away from zero.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as a display string with Indian digit grouping.
///
/// Whole amounts carry no fraction; anything else shows two decimals.
///
/// ```
/// use misboard_core::money::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123_456_750, 2)), "₹12,34,567.50");
/// assert_eq!(format_currency(Decimal::new(-1000, 0)), "-₹1,000");
/// ```
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    let grouped = group_indian(whole);
    if fraction.bytes().all(|b| b == b'0') {
        format!("{sign}{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}")
    }
}

/// Groups digits as `12,34,567`: last three, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
