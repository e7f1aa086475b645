//! The cleaned table chosen for export.

use serde::Serialize;

/// A normalized cell.
///
/// `Missing` and `Absent` both serialize as `null`; they differ only in
/// where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Text with surrounding whitespace removed, never empty
    Text(String),
    /// The source cell was blank after stripping
    Missing,
    /// The source had no cell here at all
    Absent,
}

impl Cell {
    /// Clean a raw cell: strip whitespace, map blank text to [`Cell::Missing`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Cell::Absent,
            Some("") => Cell::Missing,
            Some(text) => Cell::Text(text.to_string()),
        }
    }

    /// Create a text cell as-is.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    /// The cell text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Missing | Cell::Absent => None,
        }
    }

    /// True for [`Cell::Missing`] and [`Cell::Absent`].
    pub fn is_null(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }
}

/// Where a [`TabularResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The first detected table
    Table,
    /// Whitespace-split text of the first page with text
    Text,
}

/// Header + body rows ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularResult {
    /// Header cells, `None` for text-derived results
    pub header: Option<Vec<Option<String>>>,

    /// Body rows; lengths are not reconciled with the header
    pub rows: Vec<Vec<Cell>>,

    /// Source of the data
    pub origin: Origin,
}

impl TabularResult {
    /// Create a result with a header row.
    pub fn with_header(header: Vec<Option<String>>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: Some(header),
            rows,
            origin: Origin::Table,
        }
    }

    /// Create a headerless result.
    pub fn headerless(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: None,
            rows,
            origin: Origin::Text,
        }
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: the header width, or the widest row without one.
    pub fn column_count(&self) -> usize {
        match &self.header {
            Some(header) => header.len(),
            None => self.rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// True when there are no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names as written to output.
    ///
    /// Headerless results get positional names `0..n`, where `n` is the
    /// widest row.
    pub fn column_names(&self) -> Vec<String> {
        match &self.header {
            Some(header) => header
                .iter()
                .map(|name| name.clone().unwrap_or_default())
                .collect(),
            None => (0..self.column_count()).map(|i| i.to_string()).collect(),
        }
    }
}
