//! JSON rendering for tabular results.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::JsonFormat;
use crate::error::ExportError;
use crate::model::TabularResult;

/// Convert a result to JSON. Missing and absent cells become `null`.
pub fn to_json(result: &TabularResult, format: JsonFormat) -> Result<String, ExportError> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    }?;
    Ok(json)
}

/// Write the JSON rendering of `result` to `path` exactly as given.
///
/// Like CSV export, the file only appears once it is complete.
pub fn export_json<P: AsRef<Path>>(
    result: &TabularResult,
    path: P,
    format: JsonFormat,
) -> Result<PathBuf, ExportError> {
    let path = path.as_ref().to_path_buf();
    let json = to_json(result, format)?;
    super::write_atomically(&path, |file| {
        file.write_all(json.as_bytes())
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })
    })?;

    log::info!("Wrote JSON for {} rows to {}", result.row_count(), path.display());
    Ok(path)
}
