//! PDF-backed page text using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

use super::{PageTextSource, Result};

/// Page-text source over a PDF loaded in memory.
pub struct PdfPages {
    raw_data: Vec<u8>,
    page_count: usize,
}

impl PdfPages {
    /// Load a PDF from bytes. Encrypted documents are retried with the
    /// empty password before giving up.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("loaded PDF with {} pages", page_count);

        Ok(Self {
            raw_data,
            page_count,
        })
    }
}

impl PageTextSource for PdfPages {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
