//! Error types for the luz-core library.

use thiserror::Error;

/// Main error type for the luz library.
#[derive(Error, Debug)]
pub enum LuzError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report assembly or sink error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to report emission.
///
/// Extraction and sanitization failures are not errors: a bad document is
/// logged and dropped so the batch can continue. Only the report sink can
/// fail the whole run.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The sink rejected the workbook.
    #[error("workbook write failed: {0}")]
    Sink(String),
}

/// Result type for the luz library.
pub type Result<T> = std::result::Result<T, LuzError>;
