//! Table detection from text positions (stream mode).
//!
//! No ruling lines are needed: spans are grouped into rows by baseline,
//! column edges are the left edges that recur across rows, and runs of rows
//! that line up with those edges become tables.

use std::collections::{HashMap, HashSet};

use crate::model::{RawRow, RawTable};

use super::spans::TextSpan;

/// X positions within this many points share a column-edge bucket.
const EDGE_BUCKET: f32 = 5.0;

/// A span counts as aligned when its left edge is this close to a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Spans may start this far left of their column edge.
const COLUMN_SLACK: f32 = 10.0;

/// A detected table region.
#[derive(Debug, Clone)]
pub struct DetectedTable {
    /// Column left edges, ascending
    pub columns: Vec<f32>,
    /// Rightmost span edge in the region
    pub right_x: f32,
    /// Rows, top to bottom
    pub rows: Vec<SpanRow>,
}

/// Spans sharing a baseline.
#[derive(Debug, Clone)]
pub struct SpanRow {
    /// Average baseline of the spans
    pub y: f32,
    /// Spans sorted by X
    pub spans: Vec<TextSpan>,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum fraction of rows an edge must appear in, and of a row's spans
    /// that must sit on an edge
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 12,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Detects tables in a page's text spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables and return them as raw tables, top to bottom.
    pub fn detect_tables(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        self.detect(spans)
            .iter()
            .map(|table| self.to_raw_table(table))
            .collect()
    }

    /// Detect table regions in the given spans.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<DetectedTable> {
        let cfg = &self.config;
        if spans.len() < cfg.min_rows * cfg.min_columns {
            log::debug!("TableDetector: not enough spans ({})", spans.len());
            return vec![];
        }

        let rows = self.group_into_rows(spans);
        if rows.len() < cfg.min_rows {
            log::debug!("TableDetector: not enough rows ({})", rows.len());
            return vec![];
        }

        let columns = self.detect_columns(&rows);
        log::debug!("TableDetector: page column edges {:?}", columns);
        if columns.len() < cfg.min_columns {
            return vec![];
        }

        let mut tables = Vec::new();
        for (start, end) in self.find_table_regions(&rows, &columns) {
            let region = &rows[start..=end];

            // Each region gets its own edges; page-wide edges mix tables.
            let columns = self.detect_columns(region);
            if columns.len() < cfg.min_columns {
                continue;
            }
            if columns.len() > cfg.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    columns.len(),
                    cfg.max_columns
                );
                continue;
            }
            if is_list_pattern(region, &columns) {
                log::debug!("TableDetector: skipping region, looks like a list");
                continue;
            }

            let right_x = region
                .iter()
                .flat_map(|row| row.spans.iter())
                .map(TextSpan::right)
                .fold(f32::MIN, f32::max);

            tables.push(DetectedTable {
                columns,
                right_x,
                rows: region.to_vec(),
            });
        }

        log::debug!("TableDetector: {} table(s) detected", tables.len());
        tables
    }

    /// Group spans into rows by baseline, top of the page first.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<SpanRow> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<SpanRow> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut anchor_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match anchor_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(finish_row(std::mem::take(&mut current)));
                    }
                    anchor_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            rows.push(finish_row(current));
        }

        rows
    }

    /// Left edges that recur across rows, merged when closer than the column gap.
    ///
    /// Rows with two or more spans carry the column signal; when too few of
    /// those exist every row is counted instead.
    fn detect_columns(&self, rows: &[SpanRow]) -> Vec<f32> {
        let multi: Vec<&SpanRow> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
        let sample: Vec<&SpanRow> = if multi.len() >= self.config.min_rows {
            multi
        } else {
            rows.iter().collect()
        };
        if sample.is_empty() {
            return vec![];
        }

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &sample {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|span| (span.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((sample.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .into_iter()
            .filter(|(_, count)| *count >= min_occurrences)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(f32::total_cmp);

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(&last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Runs of consecutive aligned rows, as inclusive index pairs.
    fn find_table_regions(&self, rows: &[SpanRow], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment_score(row, columns) >= self.config.min_alignment_ratio {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push((s, i - 1));
                }
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }

        regions
    }

    /// Lay a detected region out as a grid. A column with no span in a row
    /// is an empty string, like any other blank cell inside the table.
    pub fn to_raw_table(&self, detected: &DetectedTable) -> RawTable {
        let width = detected.columns.len();
        let rows = detected
            .rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Vec<&str>> = vec![Vec::new(); width];
                for span in &row.spans {
                    let col = column_for(span.x, &detected.columns, detected.right_x);
                    cells[col].push(span.text.trim());
                }
                cells
                    .into_iter()
                    .map(|parts| Some(parts.join(" ")))
                    .collect::<RawRow>()
            })
            .collect();

        RawTable::new(rows)
    }
}

fn finish_row(mut spans: Vec<TextSpan>) -> SpanRow {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));
    let y = spans.iter().map(|s| s.y).sum::<f32>() / spans.len() as f32;
    SpanRow { y, spans }
}

/// Fraction of a row's spans that start on a column edge.
fn alignment_score(row: &SpanRow, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Index of the column a span starting at `x` belongs to.
fn column_for(x: f32, columns: &[f32], right_x: f32) -> usize {
    for (i, &start) in columns.iter().enumerate() {
        let end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if x >= start - COLUMN_SLACK && x < end - COLUMN_SLACK {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (x - **a).abs().total_cmp(&(x - **b).abs()))
        .map_or(0, |(i, _)| i)
}

/// Numbered and bulleted lists split into marker + text spans look like
/// two-column tables.
fn is_list_pattern(rows: &[SpanRow], columns: &[f32]) -> bool {
    if columns.len() < 2 || rows.is_empty() {
        return false;
    }

    let (mut bullets, mut numbers) = (0usize, 0usize);
    for row in rows {
        let Some(first) = row.spans.iter().min_by(|a, b| a.x.total_cmp(&b.x)) else {
            continue;
        };
        if is_bullet_marker(&first.text) {
            bullets += 1;
        } else if is_number_marker(&first.text) {
            numbers += 1;
        }
    }

    let total = rows.len() as f32;
    let bullet_ratio = bullets as f32 / total;
    let marker_ratio = (bullets + numbers) as f32 / total;
    log::debug!(
        "TableDetector: list markers bullets={} numbers={} rows={}",
        bullets,
        numbers,
        rows.len()
    );

    // Numbered first columns are common in real tables, so numbers only
    // veto two-column regions.
    bullet_ratio >= 0.5 || (columns.len() == 2 && marker_ratio >= 0.5)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "▶"
    )
}

/// "1.", "12)", "3", "a.", "B)".
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    let digits = cleaned.chars().take_while(char::is_ascii_digit).count();
    let rest = &cleaned[digits..];
    if digits > 0 && (rest.is_empty() || rest == "." || rest == ")") {
        return true;
    }

    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}
