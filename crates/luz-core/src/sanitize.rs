//! Raw-to-typed record conversion.
//!
//! Each stage gates the next. A failing record is logged with whatever
//! identifiers it carries and dropped; the caller never sees an error,
//! only the absence of a record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::extract::rules::amounts::{parse_amount, parse_line_amount};
use crate::extract::rules::patterns::DATE_DMY;
use crate::models::bill::{Bill, RawBill, TariffPeriod};

const DATE_FMT: &str = "%d/%m/%Y";

/// Convert a raw capture into a validated bill.
pub fn sanitize(raw: &RawBill) -> Option<Bill> {
    let cups_hint = raw.cups.as_deref().unwrap_or("?").to_string();
    let id_hint = raw.bill_id.as_deref().unwrap_or("?").to_string();

    let missing = raw.missing_fields();
    if !missing.is_empty() {
        error!(
            "missing fields for CUPS {} bill {}: {:?}",
            cups_hint, id_hint, missing
        );
        return None;
    }

    // completeness established above; the remaining `?` never fire
    let cups = raw.cups.clone()?;
    let bill_id = raw.bill_id.clone()?;

    let date_text = raw.billing_date.as_deref()?;
    let billing_date = match NaiveDate::parse_from_str(date_text, DATE_FMT) {
        Ok(date) => date,
        Err(e) => {
            error!(
                "invalid billing date '{}' for CUPS {} bill {}: {}",
                date_text, cups, bill_id, e
            );
            return None;
        }
    };

    let period_text = raw.billing_period.as_deref()?;
    let (period_start, period_end) = parse_period(period_text, &cups, &bill_id)?;

    let power_capacity = monetary(
        raw.billed_power_capacity.as_deref()?,
        "billed power capacity",
        &cups,
        &bill_id,
    )?;
    let energy_consumed = monetary(
        raw.billed_energy_consumed.as_deref()?,
        "billed energy consumed",
        &cups,
        &bill_id,
    )?;
    let total_first = monetary(
        raw.billed_amount_first.as_deref()?,
        "billed amount (first capture)",
        &cups,
        &bill_id,
    )?;
    let total_second = monetary(
        raw.billed_amount_second.as_deref()?,
        "billed amount (second capture)",
        &cups,
        &bill_id,
    )?;

    let is_rectification = total_first != total_second;
    if is_rectification {
        debug!(
            "captured totals differ ({} vs {}) for CUPS {} bill {}, marking as rectification",
            total_first, total_second, cups, bill_id
        );
    }

    let mut mandatory = [Decimal::ZERO; 3];
    for (slot, period) in mandatory.iter_mut().zip(TariffPeriod::MANDATORY) {
        match raw.tariff.get(&period).and_then(|v| parse_amount(v)) {
            Some(value) => *slot = value,
            None => {
                error!(
                    "'{}' consumption has not been extracted for CUPS {} bill {}",
                    period.code(),
                    cups,
                    bill_id
                );
                return None;
            }
        }
    }
    let [tariff_p1, tariff_p2, tariff_p3] = mandatory;

    let optional = |period: TariffPeriod| raw.tariff.get(&period).and_then(|v| parse_amount(v));

    Some(Bill {
        cups,
        bill_id,
        billing_date,
        period_start,
        period_end,
        power_capacity,
        energy_consumed,
        total_first,
        total_second,
        is_rectification,
        tariff_p1,
        tariff_p2,
        tariff_p3,
        tariff_p4: optional(TariffPeriod::P4),
        tariff_p5: optional(TariffPeriod::P5),
        tariff_p6: optional(TariffPeriod::P6),
    })
}

/// Exactly two date tokens, both valid calendar dates.
fn parse_period(text: &str, cups: &str, bill_id: &str) -> Option<(NaiveDate, NaiveDate)> {
    let tokens: Vec<&str> = DATE_DMY.find_iter(text).map(|m| m.as_str()).collect();
    if tokens.len() != 2 {
        error!(
            "billing period '{}' does not contain exactly two dates for CUPS {} bill {}",
            text, cups, bill_id
        );
        return None;
    }

    match (
        NaiveDate::parse_from_str(tokens[0], DATE_FMT),
        NaiveDate::parse_from_str(tokens[1], DATE_FMT),
    ) {
        (Ok(start), Ok(end)) => Some((start, end)),
        _ => {
            error!(
                "invalid billing period '{}' for CUPS {} bill {}",
                text, cups, bill_id
            );
            None
        }
    }
}

fn monetary(line: &str, field: &str, cups: &str, bill_id: &str) -> Option<Decimal> {
    match parse_line_amount(line) {
        Some(value) => Some(value),
        None => {
            error!(
                "{} '{}' does not contain exactly one amount for CUPS {} bill {}",
                field, line, cups, bill_id
            );
            None
        }
    }
}
