//! Per-supply-point bill aggregation.

use std::collections::HashMap;

use tracing::debug;

use crate::models::bill::Bill;

/// Two-level ledger: supply point -> (bill id -> bill).
///
/// First-seen order is kept at both levels so the report can lay sheets
/// and rows out in traversal order. Re-inserting an existing
/// (cups, bill id) pair replaces the stored record in place: the record
/// from the later-processed file wins.
#[derive(Debug, Default)]
pub struct BillLedger {
    order: Vec<String>,
    points: HashMap<String, SupplyPoint>,
}

#[derive(Debug, Default)]
struct SupplyPoint {
    order: Vec<String>,
    bills: HashMap<String, Bill>,
}

impl BillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bill, overwriting any record with the same key.
    pub fn insert(&mut self, bill: Bill) {
        if !self.points.contains_key(&bill.cups) {
            self.order.push(bill.cups.clone());
        }
        let point = self.points.entry(bill.cups.clone()).or_default();
        if point.bills.contains_key(&bill.bill_id) {
            debug!("replacing bill {} for CUPS {}", bill.bill_id, bill.cups);
        } else {
            point.order.push(bill.bill_id.clone());
        }
        point.bills.insert(bill.bill_id.clone(), bill);
    }

    /// Supply points in first-seen order.
    pub fn supply_points(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Bills of one supply point in first-seen order.
    pub fn bills(&self, cups: &str) -> impl Iterator<Item = &Bill> {
        self.points
            .get(cups)
            .into_iter()
            .flat_map(|point| point.order.iter().filter_map(|id| point.bills.get(id)))
    }

    pub fn supply_point_count(&self) -> usize {
        self.order.len()
    }

    pub fn bill_count(&self) -> usize {
        self.points.values().map(|point| point.bills.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
