//! PDF page-text access.

mod pages;

pub use pages::PdfPages;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of per-page text in reading order.
///
/// The extraction engine only ever sees page strings; anything able to
/// hand over one string per page can drive it.
pub trait PageTextSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract the text of every page, one string per page.
    fn page_texts(&self) -> Result<Vec<String>>;
}
