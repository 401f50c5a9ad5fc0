//! Report assembly: ledger to ordered sheets of typed cells.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::BillLedger;
use crate::error::ReportError;
use crate::models::bill::Bill;
use crate::models::config::ReportConfig;

/// Output column selector, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    Cups,
    BillId,
    BillingDate,
    PeriodStart,
    PeriodEnd,
    PowerCapacity,
    EnergyConsumed,
    Total,
    Rectification,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

/// One typed cell of the tabular report.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

/// A named worksheet: plain rows of cells, header row included.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// The assembled report, sheets in final display order.
#[derive(Debug, Clone)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

/// Destination for the finished report.
pub trait TabularSink {
    fn write(&mut self, report: &Report) -> Result<(), ReportError>;
}

/// Assemble the report: the fixed rate-table sheet first, then one sheet
/// per encountered supply point.
///
/// Sheet order follows the configured title list; supply points without a
/// configured title come afterwards, in encounter order, named after the
/// raw CUPS.
pub fn build_report(config: &ReportConfig, ledger: &BillLedger) -> Report {
    let mut sheets = Vec::with_capacity(ledger.supply_point_count() + 1);

    sheets.push(Sheet {
        name: config.rates.title.clone(),
        rows: config
            .rates
            .rows
            .iter()
            .map(|row| row.iter().map(|v| Cell::Text(v.clone())).collect())
            .collect(),
    });

    let mut ordered: Vec<&str> = Vec::with_capacity(ledger.supply_point_count());
    for entry in &config.sheets {
        if ledger.bills(&entry.cups).next().is_some() {
            ordered.push(entry.cups.as_str());
        }
    }
    for cups in ledger.supply_points() {
        if !ordered.contains(&cups) {
            ordered.push(cups);
        }
    }

    for cups in ordered {
        let name = config
            .sheets
            .iter()
            .find(|entry| entry.cups == cups)
            .map(|entry| entry.title.clone())
            .unwrap_or_else(|| cups.to_string());

        let header: Vec<Cell> = config
            .columns
            .iter()
            .map(|column| Cell::Text(column.label.clone()))
            .collect();

        let mut rows = vec![header];
        for bill in ledger.bills(cups) {
            rows.push(
                config
                    .columns
                    .iter()
                    .map(|column| bill_cell(bill, column.key))
                    .collect(),
            );
        }

        sheets.push(Sheet { name, rows });
    }

    Report { sheets }
}

fn bill_cell(bill: &Bill, key: ColumnKey) -> Cell {
    match key {
        ColumnKey::Cups => Cell::Text(bill.cups.clone()),
        ColumnKey::BillId => Cell::Text(bill.bill_id.clone()),
        ColumnKey::BillingDate => Cell::Date(bill.billing_date),
        ColumnKey::PeriodStart => Cell::Date(bill.period_start),
        ColumnKey::PeriodEnd => Cell::Date(bill.period_end),
        ColumnKey::PowerCapacity => number(bill.power_capacity),
        ColumnKey::EnergyConsumed => number(bill.energy_consumed),
        ColumnKey::Total => number(bill.total_first),
        ColumnKey::Rectification => Cell::Bool(bill.is_rectification),
        ColumnKey::P1 => number(bill.tariff_p1),
        ColumnKey::P2 => number(bill.tariff_p2),
        ColumnKey::P3 => number(bill.tariff_p3),
        ColumnKey::P4 => optional(bill.tariff_p4),
        ColumnKey::P5 => optional(bill.tariff_p5),
        ColumnKey::P6 => optional(bill.tariff_p6),
    }
}

fn number(value: Decimal) -> Cell {
    value.to_f64().map(Cell::Number).unwrap_or(Cell::Empty)
}

fn optional(value: Option<Decimal>) -> Cell {
    value.map(number).unwrap_or(Cell::Empty)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::models::config::SheetTitle;

    use super::*;

    fn bill(cups: &str, bill_id: &str) -> Bill {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        Bill {
            cups: cups.to_string(),
            bill_id: bill_id.to_string(),
            billing_date: date,
            period_start: date,
            period_end: date,
            power_capacity: Decimal::from_str("123.45").unwrap(),
            energy_consumed: Decimal::from_str("678.90").unwrap(),
            total_first: Decimal::from_str("802.35").unwrap(),
            total_second: Decimal::from_str("802.35").unwrap(),
            is_rectification: false,
            tariff_p1: Decimal::from_str("1300").unwrap(),
            tariff_p2: Decimal::from_str("1000").unwrap(),
            tariff_p3: Decimal::from_str("700").unwrap(),
            tariff_p4: None,
            tariff_p5: None,
            tariff_p6: None,
        }
    }

    fn ledger() -> BillLedger {
        let mut ledger = BillLedger::new();
        ledger.insert(bill("ES002", "F-1"));
        ledger.insert(bill("ES001", "F-2"));
        ledger.insert(bill("ES003", "F-3"));
        ledger
    }

    #[test]
    fn test_rate_sheet_comes_first() {
        let config = ReportConfig::default();
        let report = build_report(&config, &ledger());
        assert_eq!(report.sheets[0].name, "Tarifas");
        assert_eq!(report.sheets[0].rows.len(), config.rates.rows.len());
        assert_eq!(
            report.sheets[0].rows[0][0],
            Cell::Text("Periodo".to_string())
        );
    }

    #[test]
    fn test_configured_sheet_order_then_encounter_order() {
        let mut config = ReportConfig::default();
        config.sheets = vec![
            SheetTitle {
                cups: "ES003".to_string(),
                title: "Nave".to_string(),
            },
            SheetTitle {
                cups: "ES404".to_string(),
                title: "Baja".to_string(),
            },
        ];

        let report = build_report(&config, &ledger());
        let names: Vec<&str> = report.sheets.iter().map(|s| s.name.as_str()).collect();
        // configured title first, unseen supply point skipped, the rest
        // in encounter order under their raw identifier
        assert_eq!(names, vec!["Tarifas", "Nave", "ES002", "ES001"]);
    }

    #[test]
    fn test_sheet_rows_follow_column_config() {
        let config = ReportConfig::default();
        let report = build_report(&config, &ledger());

        let sheet = &report.sheets[1];
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].len(), config.columns.len());
        assert_eq!(sheet.rows[0][0], Cell::Text("Factura".to_string()));
        assert_eq!(sheet.rows[1][0], Cell::Text("F-1".to_string()));
        assert_eq!(
            sheet.rows[1][1],
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert_eq!(sheet.rows[1][6], Cell::Number(802.35));
    }

    #[test]
    fn test_optional_brackets_render_empty() {
        let config = ReportConfig::default();
        let report = build_report(&config, &ledger());
        let row = &report.sheets[1].rows[1];
        assert_eq!(row[row.len() - 1], Cell::Empty);
    }
}
