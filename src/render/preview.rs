//! Plain-text preview of the first rows of a result.

use crate::model::{Cell, TabularResult};

/// Shown for a cell that stripped to empty.
const MISSING: &str = "NaN";
/// Shown for a cell the source never had.
const ABSENT: &str = "None";

/// Render the first `limit` body rows as an aligned, index-prefixed table.
///
/// Columns are right-aligned and separated by two spaces. Short rows are
/// padded with the absent marker out to the full width.
pub fn preview(result: &TabularResult, limit: usize) -> String {
    let names = result.column_names();
    let width = result
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(names.len()))
        .max()
        .unwrap_or(0);

    let mut grid: Vec<Vec<String>> = Vec::new();
    let mut header = vec![String::new()];
    header.extend((0..width).map(|i| names.get(i).cloned().unwrap_or_default()));
    grid.push(header);

    for (index, row) in result.rows.iter().take(limit).enumerate() {
        let mut line = vec![index.to_string()];
        line.extend((0..width).map(|i| display(row.get(i)).to_string()));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..=width)
        .map(|col| {
            grid.iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    for line in &grid {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
            .collect();
        output.push_str(cells.join("  ").trim_end());
        output.push('\n');
    }
    output
}

fn display(cell: Option<&Cell>) -> &str {
    match cell {
        Some(Cell::Text(text)) => text,
        Some(Cell::Missing) => MISSING,
        Some(Cell::Absent) | None => ABSENT,
    }
}
