//! Rule-based field matching shared by the provider extractors.

pub mod amounts;
pub mod patterns;
pub mod tariff;

pub use amounts::{extract_amount, parse_amount, parse_line_amount};
pub use tariff::{parse_tariff_row, RowShape};

/// Everything after the last `:` on a labeled line, trimmed.
///
/// Labels occasionally print with a colon inside the label itself
/// ("Periodo de facturación: del 01/02/2024"), so the split runs from the
/// right. A line without a colon yields the whole line.
pub(crate) fn label_value(line: &str) -> Option<String> {
    line.rsplit(':').next().map(|v| v.trim().to_string())
}

/// Drop a trailing parenthetical annotation:
/// `ES0031...AB0F (Península)` becomes `ES0031...AB0F`.
pub(crate) fn strip_parenthetical(value: String) -> String {
    match value.split_once('(') {
        Some((head, _)) => head.trim().to_string(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_value() {
        assert_eq!(
            label_value("Nº factura: PMR901N0111111"),
            Some("PMR901N0111111".to_string())
        );
        assert_eq!(
            label_value("Periodo de facturación: 01/02/2024 - 29/02/2024"),
            Some("01/02/2024 - 29/02/2024".to_string())
        );
        assert_eq!(label_value("no colon here"), Some("no colon here".to_string()));
    }

    #[test]
    fn test_strip_parenthetical() {
        assert_eq!(
            strip_parenthetical("ES0031408111111111AB0F (Península)".to_string()),
            "ES0031408111111111AB0F"
        );
        assert_eq!(
            strip_parenthetical("ES0031408111111111AB0F".to_string()),
            "ES0031408111111111AB0F"
        );
    }
}
