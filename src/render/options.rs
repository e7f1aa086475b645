//! Export options and configuration.

/// Options for writing a tabular result as delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Text written for missing and absent cells
    pub na_rep: String,
}

impl ExportOptions {
    /// Create export options with defaults (comma, empty marker).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the text written for missing cells.
    pub fn with_na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.na_rep = na_rep.into();
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_rep: String::new(),
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new().with_delimiter(b';').with_na_rep("NA");
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.na_rep, "NA");

        let defaults = ExportOptions::default();
        assert_eq!(defaults.delimiter, b',');
        assert!(defaults.na_rep.is_empty());
    }
}
