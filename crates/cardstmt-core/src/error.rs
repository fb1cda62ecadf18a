//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum CardstmtError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Extraction pipeline error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

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

/// Errors raised when the extractor is configured inconsistently.
///
/// These surface at construction time only; a running extractor never
/// fails on document content.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// An issuer profile was declared without any keywords.
    #[error("issuer profile {0} has no keywords")]
    EmptyKeywords(&'static str),

    /// The plausible-year range is inverted.
    #[error("invalid plausible-year range: {min}..={max}")]
    InvalidYearRange { min: i32, max: i32 },

    /// The billing-cycle day bounds are inverted or non-positive.
    #[error("invalid billing-cycle bounds: {min}..={max} days")]
    InvalidCycleBounds { min: i64, max: i64 },
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, CardstmtError>;
