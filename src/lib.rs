//! # toolbelt
//!
//! Small command-line utilities built around a PDF table extractor.
//!
//! The extractor opens a PDF, detects tables page by page, falls back to the
//! page text when no table is found, and writes the first table it chose as
//! CSV. A TCP host checker and a password generator ship alongside it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use toolbelt::{extract_file, render};
//!
//! fn main() -> toolbelt::Result<()> {
//!     let result = extract_file("report.pdf")?;
//!     let written = render::export(result.as_ref(), "report", &Default::default())?;
//!     println!("Saved to: {}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table detection**: column alignment of positioned text spans
//! - **Text fallback**: whitespace-split page text when a PDF has no tables
//! - **Output formats**: CSV (atomic writes), JSON, aligned text preview
//! - **Utilities**: TCP reachability checks, random password generation

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod netcheck;
pub mod parser;
pub mod passgen;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{ConnectError, DocumentError, Error, ExportError, PasswordError, Result};
pub use extract::{normalize, Extractor};
pub use model::{Cell, Extraction, Origin, RawRow, RawTable, TabularResult};
pub use netcheck::HostCheck;
pub use parser::{ErrorMode, ExtractOptions, LopdfBackend, PageSelection, PageSource};
pub use passgen::PasswordPolicy;
pub use render::{ExportOptions, JsonFormat};

use std::path::{Path, PathBuf};

/// Extract the table to export from a PDF file.
///
/// Returns `Ok(None)` when the document has neither tables nor text.
///
/// # Example
///
/// ```no_run
/// use toolbelt::extract_file;
///
/// if let Some(table) = extract_file("report.pdf").unwrap() {
///     println!("{} rows", table.row_count());
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Option<TabularResult>> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract the table to export from a PDF file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Option<TabularResult>> {
    Ok(Extractor::with_options(options).run(path)?)
}

/// Extract the table to export from a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<Option<TabularResult>> {
    let extractor = Extractor::new();
    let detector = parser::TableDetector::with_config(extractor.options().detector.clone());
    let backend = LopdfBackend::from_bytes(data, detector)?;
    let extraction = extractor.extract_from(&backend)?;
    Ok(normalize(&extraction))
}

/// Convert a PDF straight to a CSV file and return the path written.
///
/// # Example
///
/// ```no_run
/// use toolbelt::pdf_to_csv;
///
/// let written = pdf_to_csv("report.pdf", "report").unwrap();
/// assert!(written.ends_with("report.csv"));
/// ```
pub fn pdf_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<PathBuf> {
    let result = extract_file(input)?;
    Ok(render::export(result.as_ref(), output, &ExportOptions::default())?)
}

/// Builder tying extraction and export options together.
///
/// # Example
///
/// ```no_run
/// use toolbelt::Toolbelt;
///
/// let table = Toolbelt::new()
///     .lenient()
///     .with_na_rep("NA")
///     .extract("report.pdf")?;
/// println!("{}", table.preview(5));
/// table.save("report.csv")?;
/// # Ok::<(), toolbelt::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Toolbelt {
    extract_options: ExtractOptions,
    export_options: ExportOptions,
}

impl Toolbelt {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Set the CSV field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.export_options = self.export_options.with_delimiter(delimiter);
        self
    }

    /// Set the text written for missing cells.
    pub fn with_na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.export_options = self.export_options.with_na_rep(na_rep);
        self
    }

    /// Extract a PDF. Fails with [`ExportError::NoData`] when nothing usable
    /// was found.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<ExtractedTable> {
        let result = Extractor::with_options(self.extract_options)
            .run(path)?
            .ok_or(ExportError::NoData)?;
        Ok(ExtractedTable {
            result,
            export_options: self.export_options,
        })
    }
}

/// A chosen table plus the options to write it with.
#[derive(Debug, Clone)]
pub struct ExtractedTable {
    /// The normalized table
    pub result: TabularResult,
    export_options: ExportOptions,
}

impl ExtractedTable {
    /// Render as CSV text.
    pub fn to_csv(&self) -> Result<String> {
        Ok(render::to_csv_string(&self.result, &self.export_options)?)
    }

    /// Render as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        Ok(render::to_json(&self.result, format)?)
    }

    /// Aligned text of the first `limit` rows.
    pub fn preview(&self, limit: usize) -> String {
        render::preview(&self.result, limit)
    }

    /// Write as CSV and return the path written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        Ok(render::export(
            Some(&self.result),
            path,
            &self.export_options,
        )?)
    }
}
