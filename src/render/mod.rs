//! Rendering module for writing tabular results to various output formats.

mod csv;
mod json;
mod options;
mod preview;

pub use self::csv::{export, to_csv_string, with_csv_extension, write_csv};
pub use json::{export_json, to_json};
pub use options::{ExportOptions, JsonFormat};
pub use preview::preview;

use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ExportError;

/// Fill a temporary file next to `path` and rename it into place.
fn write_atomically<F>(path: &Path, fill: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), ExportError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    fill(&mut file)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
