//! Output of a single extraction pass.

use serde::{Deserialize, Serialize};

use super::RawTable;

/// Every non-empty table and text blob found in a document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Non-empty tables, in page order
    pub tables: Vec<RawTable>,

    /// Non-blank page texts, in page order
    pub texts: Vec<String>,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a table unless it has no rows.
    pub fn push_table(&mut self, table: RawTable) {
        if !table.is_empty() {
            self.tables.push(table);
        }
    }

    /// Record a page text unless it is blank.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.texts.push(text);
        }
    }

    /// True when neither tables nor text were found.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.texts.is_empty()
    }
}
