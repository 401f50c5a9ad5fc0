//! Core library for electricity-bill extraction and reporting.
//!
//! This crate provides:
//! - provider detection over page-1 markers (closed `Provider` registry)
//! - per-provider field extraction rules (Endesa, Nufri, TotalEnergies)
//! - raw-to-typed sanitization of the captured fields
//! - per-supply-point aggregation and workbook report assembly
//! - PDF page text access via lopdf/pdf-extract

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod report;
pub mod sanitize;

pub use aggregate::BillLedger;
pub use error::{LuzError, Result};
pub use extract::{dispatch, Provider};
pub use models::bill::{Bill, RawBill, TariffPeriod};
pub use models::config::LuzConfig;
pub use pdf::{PageTextSource, PdfPages};
pub use pipeline::process_pages;
pub use report::{build_report, Cell, ColumnKey, Report, Sheet, TabularSink};
pub use sanitize::sanitize;
