//! Provider detection and per-provider field extraction.

pub mod rules;

mod endesa;
mod nufri;
mod total;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::bill::RawBill;
use crate::models::config::ExtractionConfig;

/// The closed set of supported invoice layouts.
///
/// Supporting a new utility means adding a variant here plus its rule
/// module; every dispatch site is an exhaustive match, so the compiler
/// points at all of them. Configuration referring to a name outside this
/// set is rejected when the configuration is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Endesa,
    Nufri,
    Total,
}

impl Provider {
    /// Run this provider's extraction rules over the page texts.
    ///
    /// Exactly one `RawBill` per invocation; ownership and tariff presence
    /// are the caller's checks.
    pub fn extract(self, pages: &[String], owner_marker: &str) -> Option<RawBill> {
        match self {
            Provider::Endesa => endesa::extract(pages, owner_marker),
            Provider::Nufri => nufri::extract(pages, owner_marker),
            Provider::Total => total::extract(pages, owner_marker),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Endesa => write!(f, "endesa"),
            Provider::Nufri => write!(f, "nufri"),
            Provider::Total => write!(f, "total"),
        }
    }
}

/// Pick the provider whose marker appears on page 1.
///
/// Markers are tried in configuration order and the first substring hit
/// wins, so when several markers match the earlier-configured entry takes
/// precedence.
pub fn dispatch(config: &ExtractionConfig, first_page: &str) -> Option<Provider> {
    for entry in &config.providers {
        if first_page.contains(&entry.marker) {
            debug!("provider marker '{}' matched -> {}", entry.marker, entry.provider);
            return Some(entry.provider);
        }
    }
    None
}
