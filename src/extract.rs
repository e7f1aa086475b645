//! Table extraction and normalization.
//!
//! [`Extractor::extract`] makes one pass over a document and collects every
//! non-empty table and page text; [`normalize`] then picks what gets
//! exported: the first table if there is one, otherwise the first page text
//! split on whitespace.

use std::path::Path;

use crate::error::DocumentError;
use crate::model::{Cell, Extraction, RawTable, TabularResult};
use crate::parser::{ErrorMode, ExtractOptions, LopdfBackend, PageSource, TableDetector};

/// Runs extraction passes with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Open the PDF at `path` and collect its tables and page texts.
    ///
    /// The document is closed before this returns, on success or failure.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Extraction, DocumentError> {
        let detector = TableDetector::with_config(self.options.detector.clone());
        let backend = LopdfBackend::open_with_detector(path, detector)?;
        self.extract_from(&backend)
    }

    /// Collect tables and page texts from an already open source.
    pub fn extract_from<S: PageSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Extraction, DocumentError> {
        let mut extraction = Extraction::new();

        for page in source.page_numbers() {
            if !self.options.pages.includes(page) {
                continue;
            }

            // Text is still collected when table detection fails.
            let tables = self
                .recover(page, source.extract_tables(page))?
                .unwrap_or_default();
            let text = self.recover(page, source.extract_text(page))?;

            log::debug!(
                "Page {}: {} table(s), {} text bytes",
                page,
                tables.len(),
                text.as_ref().map_or(0, String::len)
            );
            for table in tables {
                extraction.push_table(table);
            }
            if let Some(text) = text {
                extraction.push_text(text);
            }
        }

        log::info!(
            "Extracted {} table(s) and {} text block(s)",
            extraction.tables.len(),
            extraction.texts.len()
        );
        Ok(extraction)
    }

    /// Extract and normalize in one step.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<Option<TabularResult>, DocumentError> {
        let extraction = self.extract(path)?;
        Ok(normalize(&extraction))
    }

    /// Apply the error mode to a per-page result: strict propagates,
    /// lenient logs and yields `None`.
    fn recover<T>(
        &self,
        page: u32,
        result: Result<T, DocumentError>,
    ) -> Result<Option<T>, DocumentError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", page, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Choose and clean the data to export.
///
/// Only the first table is used; the rest are ignored. Body rows keep their
/// natural length even when it differs from the header's.
pub fn normalize(extraction: &Extraction) -> Option<TabularResult> {
    if let Some(table) = extraction.tables.first() {
        return Some(normalize_table(table));
    }
    extraction.texts.first().map(|text| split_text(text))
}

fn normalize_table(table: &RawTable) -> TabularResult {
    let mut rows = table.rows.iter();
    let header = rows.next().cloned().unwrap_or_default();
    let body = rows
        .map(|row| row.iter().map(|cell| Cell::from_raw(cell.as_deref())).collect())
        .collect();
    TabularResult::with_header(header, body)
}

fn split_text(text: &str) -> TabularResult {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(Cell::text).collect())
        .collect();
    TabularResult::headerless(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;
    use crate::parser::PageSelection;
    use std::collections::BTreeMap;

    type PageContent = (Result<Vec<RawTable>, String>, Result<String, String>);

    /// In-memory document: page number -> (tables or error, text or error).
    #[derive(Default)]
    struct FakeDocument {
        pages: BTreeMap<u32, PageContent>,
    }

    impl FakeDocument {
        fn page(mut self, number: u32, tables: Vec<RawTable>, text: &str) -> Self {
            self.pages.insert(number, (Ok(tables), Ok(text.to_string())));
            self
        }

        fn broken_page(mut self, number: u32) -> Self {
            self.pages.insert(
                number,
                (Err("bad stream".to_string()), Err("bad stream".to_string())),
            );
            self
        }

        fn broken_tables(mut self, number: u32, text: &str) -> Self {
            self.pages.insert(
                number,
                (Err("bad layout".to_string()), Ok(text.to_string())),
            );
            self
        }
    }

    impl PageSource for FakeDocument {
        fn page_numbers(&self) -> Vec<u32> {
            self.pages.keys().copied().collect()
        }

        fn extract_tables(&self, page: u32) -> Result<Vec<RawTable>, DocumentError> {
            self.pages[&page].0.clone().map_err(DocumentError::Parse)
        }

        fn extract_text(&self, page: u32) -> Result<String, DocumentError> {
            self.pages[&page]
                .1
                .clone()
                .map_err(DocumentError::TextExtract)
        }
    }

    fn name_age_table() -> RawTable {
        RawTable::from_strings([vec!["Name", "Age"], vec!["Ann", "30"], vec!["Bo", " "]])
    }

    #[test]
    fn test_extract_collects_in_page_order() {
        let doc = FakeDocument::default()
            .page(1, vec![], "intro text")
            .page(2, vec![RawTable::default(), name_age_table()], "table page")
            .page(3, vec![RawTable::from_strings([vec!["x"]])], "   ");

        let extraction = Extractor::new().extract_from(&doc).unwrap();
        assert_eq!(extraction.tables.len(), 2);
        assert_eq!(extraction.tables[0], name_age_table());
        assert_eq!(extraction.texts, vec!["intro text", "table page"]);
    }

    #[test]
    fn test_extract_respects_page_selection() {
        let doc = FakeDocument::default()
            .page(1, vec![name_age_table()], "one")
            .page(2, vec![], "two");

        let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![2]));
        let extraction = Extractor::with_options(options).extract_from(&doc).unwrap();
        assert!(extraction.tables.is_empty());
        assert_eq!(extraction.texts, vec!["two"]);
    }

    #[test]
    fn test_strict_mode_fails_on_broken_page() {
        let doc = FakeDocument::default()
            .page(1, vec![], "fine")
            .broken_page(2);

        let result = Extractor::new().extract_from(&doc);
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_lenient_mode_skips_broken_page() {
        let doc = FakeDocument::default()
            .broken_page(1)
            .page(2, vec![], "fine");

        let extractor = Extractor::with_options(ExtractOptions::new().lenient());
        let extraction = extractor.extract_from(&doc).unwrap();
        assert_eq!(extraction.texts, vec!["fine"]);
    }

    #[test]
    fn test_lenient_mode_keeps_text_when_tables_fail() {
        let doc = FakeDocument::default().broken_tables(1, "x y\nz");

        let extractor = Extractor::with_options(ExtractOptions::new().lenient());
        let extraction = extractor.extract_from(&doc).unwrap();
        assert!(extraction.tables.is_empty());
        assert_eq!(extraction.texts, vec!["x y\nz"]);
    }

    #[test]
    fn test_strict_mode_fails_when_tables_fail() {
        let doc = FakeDocument::default().broken_tables(1, "text");

        let result = Extractor::new().extract_from(&doc);
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_normalize_table_scenario() {
        let extraction = Extraction {
            tables: vec![name_age_table()],
            texts: vec!["ignored".to_string()],
        };

        let result = normalize(&extraction).unwrap();
        assert_eq!(result.origin, Origin::Table);
        assert_eq!(
            result.header,
            Some(vec![Some("Name".to_string()), Some("Age".to_string())])
        );
        assert_eq!(
            result.rows,
            vec![
                vec![Cell::text("Ann"), Cell::text("30")],
                vec![Cell::text("Bo"), Cell::Missing],
            ]
        );
    }

    #[test]
    fn test_normalize_row_count_is_source_minus_header() {
        let table = RawTable::from_strings([
            vec!["a", "b"],
            vec!["1", "2"],
            vec!["3", "4"],
            vec!["5", "6"],
        ]);
        let extraction = Extraction {
            tables: vec![table.clone()],
            texts: vec![],
        };
        let result = normalize(&extraction).unwrap();
        assert_eq!(result.row_count(), table.row_count() - 1);
    }

    #[test]
    fn test_normalize_uses_only_first_table() {
        let extraction = Extraction {
            tables: vec![
                RawTable::from_strings([vec!["first"], vec!["1"]]),
                RawTable::from_strings([vec!["second"], vec!["2"]]),
            ],
            texts: vec![],
        };
        let result = normalize(&extraction).unwrap();
        assert_eq!(result.column_names(), vec!["first"]);
        assert_eq!(result.rows, vec![vec![Cell::text("1")]]);
    }

    #[test]
    fn test_normalize_keeps_short_rows_and_absent_cells() {
        let table = RawTable::new(vec![
            vec![Some("A".into()), Some("B".into()), Some("C".into())],
            vec![Some(" 1 ".into()), None],
        ]);
        let extraction = Extraction {
            tables: vec![table],
            texts: vec![],
        };
        let result = normalize(&extraction).unwrap();
        assert_eq!(result.rows, vec![vec![Cell::text("1"), Cell::Absent]]);
        assert_eq!(result.column_count(), 3);
    }

    #[test]
    fn test_normalize_header_is_not_stripped() {
        let table = RawTable::new(vec![vec![Some(" Name ".into()), None], vec![]]);
        let extraction = Extraction {
            tables: vec![table],
            texts: vec![],
        };
        let result = normalize(&extraction).unwrap();
        assert_eq!(result.header, Some(vec![Some(" Name ".to_string()), None]));
    }

    #[test]
    fn test_normalize_text_fallback() {
        let extraction = Extraction {
            tables: vec![],
            texts: vec!["x y\nz".to_string(), "second page".to_string()],
        };

        let result = normalize(&extraction).unwrap();
        assert_eq!(result.origin, Origin::Text);
        assert!(result.header.is_none());
        assert_eq!(
            result.rows,
            vec![vec![Cell::text("x"), Cell::text("y")], vec![Cell::text("z")]]
        );
    }

    #[test]
    fn test_normalize_text_skips_blank_lines() {
        let extraction = Extraction {
            tables: vec![],
            texts: vec!["\n  a\t b  \n\n   \nc\r\n".to_string()],
        };
        let result = normalize(&extraction).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows[0], vec![Cell::text("a"), Cell::text("b")]);
    }

    #[test]
    fn test_normalize_nothing_is_absent() {
        assert!(normalize(&Extraction::new()).is_none());
    }
}
