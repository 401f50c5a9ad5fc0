//! Tariff-period row recognition.
//!
//! Tariff rows are identified by their column signature rather than by the
//! printed label alone: label wording drifts between document revisions,
//! but the number of numeric columns in each provider's consumption table
//! does not.

use crate::models::bill::TariffPeriod;

use super::patterns::{METER_CODE, NUMBER_TOKEN};

/// Column signature of a provider's tariff table.
///
/// A row is the bracket label, then `leading` numeric tokens, the
/// consumption column, then `trailing` further numeric tokens. Any other
/// count of consecutive numeric tokens after the label means the line is
/// not a tariff row.
#[derive(Debug, Clone, Copy)]
pub struct RowShape {
    pub leading: usize,
    pub trailing: usize,
    /// A meter-register code (`1.18.x`) sits between the label and the
    /// numeric columns.
    pub meter_code: bool,
}

impl RowShape {
    const fn token_count(&self) -> usize {
        self.leading + 1 + self.trailing
    }
}

/// Endesa tariff-code form: `P4 1.18.4` then five numeric columns,
/// consumption last.
pub const ENDESA_CODED: RowShape = RowShape {
    leading: 4,
    trailing: 0,
    meter_code: true,
};

/// Endesa three-bracket form: Punta/Llano/Valle then five numeric columns,
/// consumption last.
pub const ENDESA_NAMED: RowShape = RowShape {
    leading: 4,
    trailing: 0,
    meter_code: false,
};

/// Nufri: three pricing columns, then the six-column consumption block.
pub const NUFRI_ROW: RowShape = RowShape {
    leading: 3,
    trailing: 5,
    meter_code: false,
};

/// TotalEnergies: three pricing columns, then a three-column consumption
/// block.
pub const TOTAL_ROW: RowShape = RowShape {
    leading: 3,
    trailing: 2,
    meter_code: false,
};

/// Try to read `line` as a tariff row of the given shape.
///
/// Returns the canonical period and the consumption text exactly as
/// printed. The label may sit mid-line; anything after the numeric run is
/// ignored, a numeric run of the wrong length rejects the line.
pub fn parse_tariff_row(line: &str, shape: RowShape) -> Option<(TariffPeriod, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (idx, period) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| TariffPeriod::from_label(t).map(|p| (i, p)))?;

    let mut rest = &tokens[idx + 1..];
    if shape.meter_code {
        match rest.first() {
            Some(code) if METER_CODE.is_match(code) => rest = &rest[1..],
            _ => return None,
        }
    }

    let numeric = rest.iter().take_while(|t| NUMBER_TOKEN.is_match(t)).count();
    if numeric != shape.token_count() {
        return None;
    }

    Some((period, rest[shape.leading].to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_endesa_coded_row() {
        let line = "P4 1.18.4 1.278,00 2.578,00 1,00 0,00 1.300,00";
        let (period, amount) = parse_tariff_row(line, ENDESA_CODED).unwrap();
        assert_eq!(period, TariffPeriod::P4);
        assert_eq!(amount, "1.300,00");
    }

    #[test]
    fn test_endesa_coded_row_requires_meter_code() {
        let line = "P4 1.278,00 2.578,00 1,00 0,00 1.300,00";
        assert!(parse_tariff_row(line, ENDESA_CODED).is_none());
    }

    #[test]
    fn test_endesa_named_row_label_mid_line() {
        let line = "Consumo Punta 1.278,00 2.578,00 1,00 0,00 1.300,00";
        let (period, amount) = parse_tariff_row(line, ENDESA_NAMED).unwrap();
        assert_eq!(period, TariffPeriod::P1);
        assert_eq!(amount, "1.300,00");
    }

    #[test]
    fn test_wrong_column_count_is_not_a_row() {
        // four columns where Endesa prints five
        let line = "P1 1.18.1 1.278,00 2.578,00 1,00 1.300,00";
        assert!(parse_tariff_row(line, ENDESA_CODED).is_none());
        // six columns where Endesa prints five
        let line = "P1 1.18.1 1.278,00 2.578,00 1,00 0,00 2,00 1.300,00";
        assert!(parse_tariff_row(line, ENDESA_CODED).is_none());
    }

    #[test]
    fn test_trailing_junk_after_run_is_ignored() {
        let line = "P1 1.18.1 1.278,00 2.578,00 1,00 0,00 1.300,00 TOTAL 802,35 €";
        let (period, amount) = parse_tariff_row(line, ENDESA_CODED).unwrap();
        assert_eq!(period, TariffPeriod::P1);
        assert_eq!(amount, "1.300,00");
    }

    #[test]
    fn test_nufri_row_picks_first_of_consumption_block() {
        let line = "Punta 3,45 30,00 10,35 1.300,00 0,00 0,00 0,00 0,00 0,00";
        let (period, amount) = parse_tariff_row(line, NUFRI_ROW).unwrap();
        assert_eq!(period, TariffPeriod::P1);
        assert_eq!(amount, "1.300,00");
    }

    #[test]
    fn test_total_row_picks_first_of_second_block() {
        let line = "Valle 2,30 30,00 4,15 700,00 0,00 0,00";
        let (period, amount) = parse_tariff_row(line, TOTAL_ROW).unwrap();
        assert_eq!(period, TariffPeriod::P3);
        assert_eq!(amount, "700,00");
    }

    #[test]
    fn test_total_row_rejects_nufri_shape() {
        let line = "Valle 2,30 30,00 4,15 700,00 0,00 0,00 0,00 0,00 0,00";
        assert!(parse_tariff_row(line, TOTAL_ROW).is_none());
    }

    #[test]
    fn test_line_without_label() {
        let line = "Total energía 1.278,00 2.578,00 1,00 0,00 1.300,00";
        assert!(parse_tariff_row(line, ENDESA_NAMED).is_none());
    }
}
