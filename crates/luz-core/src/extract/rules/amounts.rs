//! Monetary token capture and Spanish number parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::AMOUNT;

/// Pick the single currency token out of a captured line.
///
/// Returns `None` when the line carries zero or more than one currency
/// token: an ambiguous capture is never guessed at, the owning record gets
/// dropped instead.
pub fn extract_amount(line: &str) -> Option<&str> {
    let mut matches = AMOUNT.find_iter(line);
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.as_str())
}

/// Parse a Spanish-formatted number ("1.234,56 €", "-12,00", "1.300,00")
/// into a decimal. The euro sign, whitespace and grouping periods are
/// cosmetic.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '.')
        .collect();
    Decimal::from_str(&cleaned.replace(',', ".")).ok()
}

/// Capture the single currency token of a line and parse it.
pub fn parse_line_amount(line: &str) -> Option<Decimal> {
    extract_amount(line).and_then(parse_amount)
}
