//! TotalEnergies invoice extraction rules.
//!
//! Fixed two-page layout, no fallback page. Header and the first total on
//! page 1, consumption table and the payable total on page 2.

use crate::models::bill::RawBill;

use super::rules::tariff::{parse_tariff_row, TOTAL_ROW};
use super::rules::{label_value, strip_parenthetical};

pub(super) fn extract(pages: &[String], owner_marker: &str) -> Option<RawBill> {
    let first = pages.first()?;
    let mut bill = RawBill::default();

    for line in first.lines() {
        if line.contains(owner_marker) {
            bill.is_ours = true;
            continue;
        }
        if bill.bill_id.is_none()
            && (line.contains("Número de factura:") || line.contains("Nº de factura:"))
        {
            bill.bill_id = label_value(line);
            continue;
        }
        if bill.billing_date.is_none()
            && (line.contains("Fecha de emisión:") || line.contains("Fecha emisión:"))
        {
            bill.billing_date = label_value(line);
            continue;
        }
        if bill.billing_period.is_none()
            && (line.contains("Periodo de consumo:") || line.contains("Período de consumo:"))
        {
            bill.billing_period = label_value(line);
            continue;
        }
        if bill.billed_power_capacity.is_none() && line.starts_with("Término fijo") {
            bill.billed_power_capacity = Some(line.to_string());
            continue;
        }
        if bill.billed_energy_consumed.is_none() && line.starts_with("Término variable") {
            bill.billed_energy_consumed = Some(line.to_string());
            continue;
        }
        if bill.billed_amount_first.is_none() && line.starts_with("Importe total") {
            bill.billed_amount_first = Some(line.to_string());
            continue;
        }
        if bill.cups.is_none() && line.contains("CUPS") {
            bill.cups = label_value(line).map(strip_parenthetical);
        }
    }

    if let Some(second) = pages.get(1) {
        for line in second.lines() {
            if bill.billed_amount_second.is_none() && line.contains("TOTAL A PAGAR") {
                bill.billed_amount_second = Some(line.to_string());
                continue;
            }
            if let Some((period, amount)) = parse_tariff_row(line, TOTAL_ROW) {
                bill.tariff.entry(period).or_insert(amount);
            }
        }
    }

    Some(bill)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::bill::TariffPeriod;

    use super::*;

    fn pages() -> Vec<String> {
        vec![
            "\
TOTALENERGIES CLIENTES S.A.U.
CAMPANILLA LOGÍSTICA S.L.
Número de factura: TE-2024-098765
Fecha de emisión: 20/05/2024
Periodo de consumo: 01/04/2024 - 30/04/2024
CUPS: ES0099000087654321ZL2K (tarifa 3.0TD)
Término fijo 110,00 €
Término variable 356,40 €
Importe total 466,40 €"
                .to_string(),
            "\
Consumos por periodo
Punta 4,20 30,00 12,10 520,00 0,00 0,00
Llano 4,20 30,00 7,35 460,00 0,00 0,00
Valle 4,20 30,00 3,15 310,00 0,00 0,00
TOTAL A PAGAR 466,40 €"
                .to_string(),
        ]
    }

    #[test]
    fn test_extract_full_record() {
        let bill = extract(&pages(), "CAMPANILLA").unwrap();
        assert!(bill.is_ours);
        assert_eq!(bill.bill_id.as_deref(), Some("TE-2024-098765"));
        assert_eq!(bill.billing_date.as_deref(), Some("20/05/2024"));
        assert_eq!(
            bill.billing_period.as_deref(),
            Some("01/04/2024 - 30/04/2024")
        );
        assert_eq!(bill.cups.as_deref(), Some("ES0099000087654321ZL2K"));
        assert!(bill.missing_fields().is_empty());
    }

    #[test]
    fn test_parenthetical_stripped_from_cups() {
        let bill = extract(&pages(), "CAMPANILLA").unwrap();
        assert_eq!(bill.cups.as_deref(), Some("ES0099000087654321ZL2K"));
    }

    #[test]
    fn test_tariff_rows() {
        let bill = extract(&pages(), "CAMPANILLA").unwrap();
        assert_eq!(bill.tariff.len(), 3);
        assert_eq!(
            bill.tariff.get(&TariffPeriod::P1).map(String::as_str),
            Some("520,00")
        );
        assert_eq!(
            bill.tariff.get(&TariffPeriod::P3).map(String::as_str),
            Some("310,00")
        );
    }

    #[test]
    fn test_wrong_shape_rows_are_ignored() {
        let mut pages = pages();
        // Endesa-shaped rows must not register for this layout
        pages[1] = "\
Consumos por periodo
P1 1.18.1 1.278,00 2.578,00 1,00 0,00 1.300,00
TOTAL A PAGAR 466,40 €"
            .to_string();
        let bill = extract(&pages, "CAMPANILLA").unwrap();
        assert!(bill.tariff.is_empty());
    }
}
