//! Endesa invoice extraction rules.
//!
//! Header fields sit on page 1; the CUPS, the control copy of the total
//! and the tariff table on page 2. Some document revisions push the tariff
//! table to page 3, so a fallback scan runs there when page 2 yields no
//! tariff row.

use tracing::debug;

use crate::models::bill::RawBill;

use super::rules::tariff::{parse_tariff_row, ENDESA_CODED, ENDESA_NAMED};
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
            && (line.contains("Nº factura:")
                || line.contains("Nº de factura:")
                || line.contains("Nºfactura:"))
        {
            bill.bill_id = label_value(line);
            continue;
        }
        if bill.billing_date.is_none()
            && (line.contains("Fecha emisión factura:") || line.contains("Fechaemisiónfactura:"))
        {
            bill.billing_date = label_value(line);
            continue;
        }
        if bill.billing_period.is_none()
            && (line.contains("Periodo de facturación:") || line.contains("Periododefacturación"))
        {
            bill.billing_period = label_value(line);
            continue;
        }
        if bill.billed_power_capacity.is_none() && line.starts_with("Potencia ") {
            bill.billed_power_capacity = Some(line.to_string());
            continue;
        }
        if bill.billed_energy_consumed.is_none() && line.starts_with("Energía ") {
            bill.billed_energy_consumed = Some(line.to_string());
            continue;
        }
        if bill.billed_amount_first.is_none() && line.starts_with("Total ") {
            bill.billed_amount_first = Some(line.to_string());
        }
    }

    if let Some(second) = pages.get(1) {
        for line in second.lines() {
            if bill.cups.is_none() && line.contains("CUPS") {
                bill.cups = label_value(line).map(strip_parenthetical);
                continue;
            }
            if bill.billed_amount_second.is_none() && line.contains("TOTAL ") {
                bill.billed_amount_second = Some(line.to_string());
                // the total and a tariff row occasionally share a line, so
                // the tariff check below still runs
            }
            scan_tariff_line(&mut bill, line);
        }
    }

    if bill.tariff.is_empty() {
        if let Some(third) = pages.get(2) {
            debug!("no tariff rows on page 2, scanning page 3");
            for line in third.lines() {
                scan_tariff_line(&mut bill, line);
            }
        }
    }

    Some(bill)
}

fn scan_tariff_line(bill: &mut RawBill, line: &str) {
    let row = parse_tariff_row(line, ENDESA_CODED).or_else(|| parse_tariff_row(line, ENDESA_NAMED));
    if let Some((period, amount)) = row {
        bill.tariff.entry(period).or_insert(amount);
    }
}
