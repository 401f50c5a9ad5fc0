//! Bill records: the raw field capture and the sanitized, typed form.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical time-of-use billing bracket.
///
/// Six-bracket tariffs label their consumption rows P1..P6. Three-bracket
/// tariffs label them Punta/Llano/Valle, which correspond to P1/P2/P3.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TariffPeriod {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

impl TariffPeriod {
    /// Brackets every accepted bill must carry.
    pub const MANDATORY: [TariffPeriod; 3] = [TariffPeriod::P1, TariffPeriod::P2, TariffPeriod::P3];

    /// Map a printed row label onto the canonical code.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "P1" | "Punta" => Some(TariffPeriod::P1),
            "P2" | "Llano" => Some(TariffPeriod::P2),
            "P3" | "Valle" => Some(TariffPeriod::P3),
            "P4" => Some(TariffPeriod::P4),
            "P5" => Some(TariffPeriod::P5),
            "P6" => Some(TariffPeriod::P6),
            _ => None,
        }
    }

    /// Canonical code as printed in reports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            TariffPeriod::P1 => "P1",
            TariffPeriod::P2 => "P2",
            TariffPeriod::P3 => "P3",
            TariffPeriod::P4 => "P4",
            TariffPeriod::P5 => "P5",
            TariffPeriod::P6 => "P6",
        }
    }
}

/// Field capture from a single extractor pass over one document.
///
/// Everything here is the raw text the line triggers picked up; nothing has
/// been validated beyond the trigger itself. A `RawBill` is produced once,
/// handed to sanitization once, and never reused.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawBill {
    /// The configured customer marker was found on page 1.
    pub is_ours: bool,
    /// Invoice identifier as printed.
    pub bill_id: Option<String>,
    /// Issue date text, expected `dd/mm/yyyy`.
    pub billing_date: Option<String>,
    /// Billing period text, expected to contain two `dd/mm/yyyy` tokens.
    pub billing_period: Option<String>,
    /// Verbatim line carrying the billed power-capacity amount.
    pub billed_power_capacity: Option<String>,
    /// Verbatim line carrying the billed energy amount.
    pub billed_energy_consumed: Option<String>,
    /// Verbatim line carrying the invoice total, first capture.
    pub billed_amount_first: Option<String>,
    /// Verbatim line carrying the invoice total, second capture.
    pub billed_amount_second: Option<String>,
    /// Supply-point identifier, trailing parenthetical stripped.
    pub cups: Option<String>,
    /// Consumption text per tariff bracket, as printed in the tariff table.
    pub tariff: BTreeMap<TariffPeriod, String>,
}

impl RawBill {
    /// Names of declared fields that are still missing or blank.
    ///
    /// The tariff map is checked separately by the sanitizer since its
    /// required keys depend on the bracket scheme.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let declared = [
            ("bill_id", &self.bill_id),
            ("billing_date", &self.billing_date),
            ("billing_period", &self.billing_period),
            ("billed_power_capacity", &self.billed_power_capacity),
            ("billed_energy_consumed", &self.billed_energy_consumed),
            ("billed_amount_first", &self.billed_amount_first),
            ("billed_amount_second", &self.billed_amount_second),
            ("cups", &self.cups),
        ];

        declared
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }
}

/// A validated bill.
///
/// Produced by exactly one sanitization pass and never mutated afterwards.
/// `(cups, bill_id)` is the aggregate key.
#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    /// Supply-point identifier.
    pub cups: String,
    /// Invoice identifier.
    pub bill_id: String,
    /// Issue date.
    pub billing_date: NaiveDate,
    /// First day of the billing period.
    pub period_start: NaiveDate,
    /// Last day of the billing period.
    pub period_end: NaiveDate,
    /// Amount billed for contracted power capacity.
    pub power_capacity: Decimal,
    /// Amount billed for consumed energy.
    pub energy_consumed: Decimal,
    /// Invoice total, first capture.
    pub total_first: Decimal,
    /// Invoice total, second capture.
    pub total_second: Decimal,
    /// The two captured totals disagree; the document is a corrected reissue.
    pub is_rectification: bool,
    /// Consumption per mandatory bracket.
    pub tariff_p1: Decimal,
    pub tariff_p2: Decimal,
    pub tariff_p3: Decimal,
    /// Consumption per optional bracket, six-bracket tariffs only.
    pub tariff_p4: Option<Decimal>,
    pub tariff_p5: Option<Decimal>,
    pub tariff_p6: Option<Decimal>,
}
