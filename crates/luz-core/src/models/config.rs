//! Run configuration: input scan, extraction markers, report layout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::Provider;
use crate::report::ColumnKey;

/// Main configuration for a luz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LuzConfig {
    /// Input scan configuration.
    pub input: InputConfig,

    /// Provider detection and ownership configuration.
    pub extraction: ExtractionConfig,

    /// Report layout configuration.
    pub report: ReportConfig,
}

impl Default for LuzConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            extraction: ExtractionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Input scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned recursively for invoice PDFs.
    pub dir: PathBuf,

    /// Maximum number of files to process, applied after traversal
    /// (-1 = no limit).
    pub limit: i64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("bills"),
            limit: -1,
        }
    }
}

/// Provider detection and ownership configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Customer marker; a bill without it on page 1 is not ours.
    pub owner_marker: String,

    /// Ordered detection table. The first marker found in the page-1 text
    /// selects the extractor.
    pub providers: Vec<ProviderMarker>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            owner_marker: "CAMPANILLA".to_string(),
            providers: vec![
                ProviderMarker {
                    marker: "ENDESA".to_string(),
                    provider: Provider::Endesa,
                },
                ProviderMarker {
                    marker: "NUFRI".to_string(),
                    provider: Provider::Nufri,
                },
                ProviderMarker {
                    marker: "TOTALENERGIES".to_string(),
                    provider: Provider::Total,
                },
            ],
        }
    }
}

/// One entry of the detection table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMarker {
    /// Substring looked up in the page-1 text.
    pub marker: String,
    /// Extractor bound to the marker.
    pub provider: Provider,
}

/// Report layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Workbook path.
    pub output: PathBuf,

    /// Output columns in display order.
    pub columns: Vec<ColumnSpec>,

    /// Sheet titles per supply point, in display order. Supply points not
    /// listed here get a sheet named after the raw CUPS, appended after
    /// the configured ones.
    pub sheets: Vec<SheetTitle>,

    /// Static tariff-rate table echoed verbatim into the first sheet.
    pub rates: RateTable,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("bills.xlsx"),
            columns: default_columns(),
            sheets: Vec::new(),
            rates: RateTable::default(),
        }
    }
}

/// One output column: selector plus header label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub label: String,
}

/// Display title for one supply point's sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetTitle {
    pub cups: String,
    pub title: String,
}

/// The static rate table shown on the first sheet of every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            title: "Tarifas".to_string(),
            rows: vec![
                vec![
                    "Periodo".to_string(),
                    "Potencia €/kW día".to_string(),
                    "Energía €/kWh".to_string(),
                ],
                vec!["P1".to_string(), "0,075013".to_string(), "0,139".to_string()],
                vec!["P2".to_string(), "0,037519".to_string(), "0,125".to_string()],
                vec!["P3".to_string(), "0,013709".to_string(), "0,101".to_string()],
                vec!["P4".to_string(), "0,012158".to_string(), "0,093".to_string()],
                vec!["P5".to_string(), "0,004829".to_string(), "0,087".to_string()],
                vec!["P6".to_string(), "0,002830".to_string(), "0,080".to_string()],
            ],
        }
    }
}

fn default_columns() -> Vec<ColumnSpec> {
    let spec = |key, label: &str| ColumnSpec {
        key,
        label: label.to_string(),
    };
    vec![
        spec(ColumnKey::BillId, "Factura"),
        spec(ColumnKey::BillingDate, "Fecha emisión"),
        spec(ColumnKey::PeriodStart, "Inicio periodo"),
        spec(ColumnKey::PeriodEnd, "Fin periodo"),
        spec(ColumnKey::PowerCapacity, "Potencia (€)"),
        spec(ColumnKey::EnergyConsumed, "Energía (€)"),
        spec(ColumnKey::Total, "Total (€)"),
        spec(ColumnKey::Rectification, "Rectificativa"),
        spec(ColumnKey::P1, "P1 (kWh)"),
        spec(ColumnKey::P2, "P2 (kWh)"),
        spec(ColumnKey::P3, "P3 (kWh)"),
        spec(ColumnKey::P4, "P4 (kWh)"),
        spec(ColumnKey::P5, "P5 (kWh)"),
        spec(ColumnKey::P6, "P6 (kWh)"),
    ]
}

impl LuzConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = LuzConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: LuzConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.owner_marker, config.extraction.owner_marker);
        assert_eq!(back.extraction.providers.len(), 3);
        assert_eq!(back.report.columns.len(), config.report.columns.len());
    }

    #[test]
    fn test_unknown_provider_name_is_rejected() {
        let json = r#"{
            "extraction": {
                "providers": [ { "marker": "IBERDROLA", "provider": "iberdrola" } ]
            }
        }"#;
        assert!(serde_json::from_str::<LuzConfig>(json).is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "input": { "dir": "facturas" } }"#;
        let config: LuzConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("facturas"));
        assert_eq!(config.input.limit, -1);
        assert_eq!(config.extraction.owner_marker, "CAMPANILLA");
    }
}
