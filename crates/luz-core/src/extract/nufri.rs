//! Nufri invoice extraction rules.
//!
//! Fixed two-page layout: header, totals and CUPS on page 1, the
//! consumption table and the control copy of the total on page 2. Unlike
//! Endesa there is no fallback page; a bill without tariff rows on page 2
//! is simply incomplete.

use crate::models::bill::RawBill;

use super::rules::tariff::{parse_tariff_row, NUFRI_ROW};
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
            && (line.contains("Factura nº:")
                || line.contains("Factura n.º:")
                || line.contains("Nº factura:"))
        {
            bill.bill_id = label_value(line);
            continue;
        }
        if bill.billing_date.is_none()
            && (line.contains("Fecha factura:") || line.contains("Fecha de factura:"))
        {
            bill.billing_date = label_value(line);
            continue;
        }
        if bill.billing_period.is_none()
            && (line.contains("Período de facturación:") || line.contains("Periodo de facturación:"))
        {
            bill.billing_period = label_value(line);
            continue;
        }
        if bill.billed_power_capacity.is_none()
            && (line.starts_with("Término de potencia") || line.starts_with("Término potencia"))
        {
            bill.billed_power_capacity = Some(line.to_string());
            continue;
        }
        if bill.billed_energy_consumed.is_none()
            && (line.starts_with("Término de energía") || line.starts_with("Término energía"))
        {
            bill.billed_energy_consumed = Some(line.to_string());
            continue;
        }
        if bill.billed_amount_first.is_none() && line.starts_with("TOTAL FACTURA") {
            bill.billed_amount_first = Some(line.to_string());
            continue;
        }
        if bill.cups.is_none() && line.contains("CUPS") {
            bill.cups = label_value(line).map(strip_parenthetical);
        }
    }

    if let Some(second) = pages.get(1) {
        for line in second.lines() {
            if bill.billed_amount_second.is_none() && line.contains("IMPORTE TOTAL") {
                bill.billed_amount_second = Some(line.to_string());
                continue;
            }
            if let Some((period, amount)) = parse_tariff_row(line, NUFRI_ROW) {
                bill.tariff.entry(period).or_insert(amount);
            }
        }
    }

    Some(bill)
}
