//! Error types for papermorph.
//!
//! The profiling, role inference, structuring and HTML rendering stages never
//! fail on data shape: they degrade to empty profiles or empty node lists.
//! These errors come from the I/O-facing layers around them.

use std::io;
use thiserror::Error;

/// Result type alias for papermorph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, rendering or rasterizing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version string we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error serializing a profile or node list.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The HTML-to-PDF renderer ran but failed.
    #[error("PDF rasterization failed: {0}")]
    Rasterize(String),

    /// No HTML-to-PDF renderer could be started.
    #[error("No PDF renderer available: {0}")]
    RasterizerUnavailable(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
