//! Error types for toolbelt.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for toolbelt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error produced by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document could not be opened or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The extracted data could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The password policy was rejected.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// A host connectivity check failed.
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

/// Errors raised while opening or reading a PDF document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// I/O error when reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),
}

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => DocumentError::Io(e),
            lopdf::Error::Decryption(_) => DocumentError::Encrypted,
            _ => DocumentError::Parse(err.to_string()),
        }
    }
}

/// Errors raised while writing a tabular result.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There is no extracted data to write.
    #[error("No data to export")]
    NoData,

    /// The output path could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV writer rejected a record.
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Password policy violations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Your password should have at least {min} characters")]
    TooShort { min: usize, requested: usize },

    #[error("Your password should have a maximum of {max} characters")]
    TooLong { max: usize, requested: usize },
}

/// Host connectivity failures.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The host name could not be resolved.
    #[error("Cannot resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    /// Resolution succeeded but produced no addresses.
    #[error("No addresses found for {host}")]
    NoAddress { host: String },

    /// Every resolved address refused or timed out.
    #[error("Connection to {host}:{port} failed: {source}")]
    Unreachable {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// A zero timeout cannot bound a connection attempt.
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}
