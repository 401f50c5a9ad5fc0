//! Per-document processing: dispatch, extract, gate, sanitize.

use tracing::{info, warn};

use crate::extract::dispatch;
use crate::models::bill::Bill;
use crate::models::config::ExtractionConfig;
use crate::sanitize::sanitize;

/// Run one document's page texts through the full parsing pipeline.
///
/// Every failure is local to the document: the reason is logged and `None`
/// comes back so the batch can move on to the next file.
pub fn process_pages(config: &ExtractionConfig, pages: &[String]) -> Option<Bill> {
    let first = match pages.first() {
        Some(page) => page,
        None => {
            warn!("document has no page text, skipping");
            return None;
        }
    };

    let provider = match dispatch(config, first) {
        Some(provider) => provider,
        None => {
            info!("no provider marker matched, skipping");
            return None;
        }
    };

    let raw = provider.extract(pages, &config.owner_marker)?;

    if !raw.is_ours {
        warn!("document does not carry the owner marker, skipping");
        return None;
    }
    if raw.tariff.is_empty() {
        warn!("no tariff rows found, skipping");
        return None;
    }

    sanitize(&raw)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    fn endesa_pages(second_total: &str) -> Vec<String> {
        vec![
            "\
ENDESA ENERGÍA XXI S.L.U.
CAMPANILLA LOGÍSTICA S.L.
Nº factura: PMR901N0111111
Fecha emisión factura: 05/03/2024
Periodo de facturación: 01/02/2024 - 29/02/2024
Potencia facturada 123,45 €
Energía consumida en el periodo 678,90 €
Total importe factura 802,35 €"
                .to_string(),
            format!(
                "\
CUPS: ES0031408111111111AB0F (Península)
P1 1.18.1 1.278,00 2.578,00 1,00 0,00 1.300,00
P2 1.18.2 900,00 1.900,00 1,00 0,00 1.000,00
P3 1.18.3 500,00 1.200,00 1,00 0,00 700,00
TOTAL IMPORTE {}",
                second_total
            ),
        ]
    }

    // two pages, owner marker present, well-formed dates, three tariff
    // rows, identical totals on both pages
    #[test]
    fn test_matching_totals_yield_plain_record() {
        let bill = process_pages(&config(), &endesa_pages("802,35 €")).unwrap();
        assert_eq!(bill.cups, "ES0031408111111111AB0F");
        assert!(!bill.is_rectification);
        assert_eq!(bill.tariff_p1, Decimal::from_str("1300.00").unwrap());
        assert_eq!(bill.tariff_p2, Decimal::from_str("1000.00").unwrap());
        assert_eq!(bill.tariff_p3, Decimal::from_str("700.00").unwrap());
    }

    #[test]
    fn test_missing_owner_marker_drops_file() {
        let mut pages = endesa_pages("802,35 €");
        let without_owner = pages[0].replace("CAMPANILLA LOGÍSTICA S.L.\n", "");
        pages[0] = without_owner;
        assert!(process_pages(&config(), &pages).is_none());
    }

    #[test]
    fn test_differing_totals_mark_rectification() {
        let bill = process_pages(&config(), &endesa_pages("900,00 €")).unwrap();
        assert!(bill.is_rectification);
    }

    #[test]
    fn test_no_tariff_rows_drops_file() {
        let mut pages = endesa_pages("802,35 €");
        pages[1] = "CUPS: ES0031408111111111AB0F\nTOTAL IMPORTE 802,35 €".to_string();
        assert!(process_pages(&config(), &pages).is_none());
    }

    #[test]
    fn test_unmatched_marker_drops_file() {
        let mut pages = endesa_pages("802,35 €");
        let reworded = pages[0].replace("ENDESA", "ACME POWER");
        pages[0] = reworded;
        assert!(process_pages(&config(), &pages).is_none());
    }

    #[test]
    fn test_empty_document() {
        assert!(process_pages(&config(), &[]).is_none());
    }

    #[test]
    fn test_nufri_document_dispatches() {
        let pages = vec![
            "\
NUFRI ENERGÍA S.L.
Titular: CAMPANILLA LOGÍSTICA S.L.
Factura nº: N24-004567
Fecha factura: 12/04/2024
Período de facturación: 01/03/2024 - 31/03/2024
CUPS: ES0021000012345678XY1P
Término de potencia 98,70 €
Término de energía 432,10 €
TOTAL FACTURA 530,80 €"
                .to_string(),
            "\
Punta 3,45 31,00 10,35 410,00 0,00 0,00 0,00 0,00 0,00
Llano 3,45 31,00 6,20 380,00 0,00 0,00 0,00 0,00 0,00
Valle 3,45 31,00 2,05 290,00 0,00 0,00 0,00 0,00 0,00
IMPORTE TOTAL 530,80 €"
                .to_string(),
        ];

        let bill = process_pages(&config(), &pages).unwrap();
        assert_eq!(bill.bill_id, "N24-004567");
        assert_eq!(bill.tariff_p1, Decimal::from_str("410.00").unwrap());
        assert!(!bill.is_rectification);
    }
}
