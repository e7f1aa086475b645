//! Delimited text output.
//!
//! The header row comes first (positional names `0..n` for headerless
//! results), then one record per body row. Rows keep their own length, so
//! the writer runs in flexible mode. Every record ends with `\n`.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::ExportOptions;
use crate::error::ExportError;
use crate::model::{Cell, TabularResult};

/// Write `result` as delimited text to `writer`.
pub fn write_csv<W: Write>(
    result: &TabularResult,
    writer: W,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(result.column_names())?;
    for row in &result.rows {
        writer.write_record(row.iter().map(|cell| field(cell, options)))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render `result` to a string, byte-for-byte what [`export`] writes.
pub fn to_csv_string(
    result: &TabularResult,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `result` to `path` and return the path actually written.
///
/// `.csv` is appended unless the path already ends with it. The data goes
/// to a temporary file in the target directory first and is renamed into
/// place, so a failed export leaves nothing behind.
pub fn export<P: AsRef<Path>>(
    result: Option<&TabularResult>,
    path: P,
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let result = result.ok_or(ExportError::NoData)?;
    let path = with_csv_extension(path.as_ref());
    super::write_atomically(&path, |file| write_csv(result, file, options))?;

    log::info!(
        "Wrote {} rows × {} columns to {}",
        result.row_count(),
        result.column_count(),
        path.display()
    );
    Ok(path)
}

/// Append `.csv` unless the path already ends with it.
pub fn with_csv_extension(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(".csv") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}

fn field<'a>(cell: &'a Cell, options: &'a ExportOptions) -> &'a str {
    cell.as_str().unwrap_or(&options.na_rep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name_age() -> TabularResult {
        TabularResult::with_header(
            vec![Some("Name".into()), Some("Age".into())],
            vec![
                vec![Cell::text("Ann"), Cell::text("30")],
                vec![Cell::text("Bo"), Cell::Missing],
            ],
        )
    }

    #[test]
    fn test_csv_with_header() {
        let csv = to_csv_string(&name_age(), &ExportOptions::default()).unwrap();
        assert_eq!(csv, "Name,Age\nAnn,30\nBo,\n");
    }

    #[test]
    fn test_csv_headerless_gets_positional_names() {
        let result = TabularResult::headerless(vec![
            vec![Cell::text("x"), Cell::text("y")],
            vec![Cell::text("z")],
        ]);
        let csv = to_csv_string(&result, &ExportOptions::default()).unwrap();
        assert_eq!(csv, "0,1\nx,y\nz\n");
    }

    #[test]
    fn test_csv_na_rep_and_delimiter() {
        let options = ExportOptions::new().with_delimiter(b';').with_na_rep("NA");
        let csv = to_csv_string(&name_age(), &options).unwrap();
        assert_eq!(csv, "Name;Age\nAnn;30\nBo;NA\n");
    }

    #[test]
    fn test_csv_quotes_fields_with_delimiter() {
        let result = TabularResult::with_header(
            vec![Some("City".into())],
            vec![vec![Cell::text("Seoul, KR")], vec![Cell::text("say \"hi\"")]],
        );
        let csv = to_csv_string(&result, &ExportOptions::default()).unwrap();
        assert_eq!(csv, "City\n\"Seoul, KR\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_absent_cell_uses_na_rep() {
        let result = TabularResult::with_header(
            vec![Some("A".into()), None],
            vec![vec![Cell::Absent, Cell::text("1")]],
        );
        let csv = to_csv_string(&result, &ExportOptions::new().with_na_rep("-")).unwrap();
        assert_eq!(csv, "A,\n-,1\n");
    }

    #[test]
    fn test_with_csv_extension() {
        assert_eq!(with_csv_extension(Path::new("out")), PathBuf::from("out.csv"));
        assert_eq!(
            with_csv_extension(Path::new("dir/out.csv")),
            PathBuf::from("dir/out.csv")
        );
        assert_eq!(
            with_csv_extension(Path::new("report.txt")),
            PathBuf::from("report.txt.csv")
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let written = export(
            Some(&name_age()),
            dir.path().join("people"),
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(written, dir.path().join("people.csv"));
        let content = std::fs::read_to_string(&written).unwrap();
        assert_eq!(content, "Name,Age\nAnn,30\nBo,\n");
    }

    #[test]
    fn test_export_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("twice.csv");
        let options = ExportOptions::default();

        export(Some(&name_age()), &path, &options).unwrap();
        let first = std::fs::read(&path).unwrap();
        export(Some(&name_age()), &path, &options).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_without_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let err = export(None, &path, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = export(Some(&name_age()), &path, &ExportOptions::default()).unwrap_err();
        match err {
            ExportError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }
}
