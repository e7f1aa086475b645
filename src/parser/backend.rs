//! PDF backend abstraction layer.
//!
//! The extractor only needs three capabilities from a PDF library: list the
//! pages, find tables on a page, and read a page's text. [`PageSource`]
//! captures exactly that so the concrete library (lopdf) stays behind
//! [`LopdfBackend`] and tests can substitute an in-memory source.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::DocumentError;
use crate::model::RawTable;

use super::spans::{collect_spans, decode_text_simple, spans_to_text, GlyphDecoder, TextSpan};
use super::table_detector::TableDetector;

/// Page-level access to an open document.
pub trait PageSource {
    /// 1-based page numbers in document order.
    fn page_numbers(&self) -> Vec<u32>;

    /// Tables detected on a page, top to bottom.
    fn extract_tables(&self, page: u32) -> Result<Vec<RawTable>, DocumentError>;

    /// The page's text, one line per visual line.
    fn extract_text(&self, page: u32) -> Result<String, DocumentError>;
}

/// Concrete [`PageSource`] backed by `lopdf::Document`.
///
/// The parsed document lives as long as the backend value; dropping it
/// releases everything.
pub struct LopdfBackend {
    doc: LopdfDocument,
    detector: TableDetector,
}

impl LopdfBackend {
    /// Open a PDF file with the default table detector.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        Self::open_with_detector(path, TableDetector::new())
    }

    /// Open a PDF file with a custom table detector.
    pub fn open_with_detector<P: AsRef<Path>>(
        path: P,
        detector: TableDetector,
    ) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path)?;
        log::info!(
            "Opened {} ({}, {} pages)",
            path.display(),
            format,
            doc.get_pages().len()
        );
        Ok(Self::from_document(doc, detector))
    }

    /// Load a PDF held in memory.
    pub fn from_bytes(data: &[u8], detector: TableDetector) -> Result<Self, DocumentError> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc, detector))
    }

    fn from_document(doc: LopdfDocument, detector: TableDetector) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may be unreadable");
        }
        Self { doc, detector }
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Positioned text spans drawn on a page.
    pub fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>, DocumentError> {
        let page_id = self.page_id(page)?;
        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let operations = lopdf::content::Content::decode(&content)
            .map_err(|e| DocumentError::Parse(format!("Page {}: {}", page, e)))?
            .operations;
        let fonts = PageFonts {
            doc: &self.doc,
            fonts: self.doc.get_page_fonts(page_id).unwrap_or_default(),
        };
        Ok(collect_spans(&operations, &fonts))
    }

    fn page_id(&self, page: u32) -> Result<ObjectId, DocumentError> {
        let pages = self.doc.get_pages();
        pages
            .get(&page)
            .copied()
            .ok_or(DocumentError::PageOutOfRange(page, pages.len() as u32))
    }

    /// Decompressed content stream bytes; empty for a page without contents.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>, DocumentError> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        let refs: Vec<ObjectId> = match contents {
            Object::Reference(r) => vec![*r],
            Object::Array(arr) => arr.iter().filter_map(|o| o.as_reference().ok()).collect(),
            _ => return Err(DocumentError::Parse("Invalid content stream".to_string())),
        };

        let mut content = Vec::new();
        for r in refs {
            if let Ok(Object::Stream(stream)) = self.doc.get_object(r) {
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                content.extend_from_slice(&data);
                content.push(b'\n');
            }
        }
        Ok(content)
    }
}

impl PageSource for LopdfBackend {
    fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().keys().copied().collect()
    }

    fn extract_tables(&self, page: u32) -> Result<Vec<RawTable>, DocumentError> {
        let spans = self.page_spans(page)?;
        Ok(self.detector.detect_tables(&spans))
    }

    fn extract_text(&self, page: u32) -> Result<String, DocumentError> {
        match self.page_spans(page) {
            Ok(spans) => Ok(spans_to_text(&spans)),
            Err(DocumentError::PageOutOfRange(p, n)) => Err(DocumentError::PageOutOfRange(p, n)),
            Err(e) => {
                log::debug!("Span extraction failed on page {} ({}), using lopdf text", page, e);
                self.doc
                    .extract_text(&[page])
                    .map_err(|e| DocumentError::TextExtract(format!("Page {}: {}", page, e)))
            }
        }
    }
}

/// Font-aware decoding for one page.
struct PageFonts<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
}

impl GlyphDecoder for PageFonts<'_> {
    fn decode(&self, font: &[u8], bytes: &[u8]) -> String {
        self.fonts
            .get(font)
            .and_then(|dict| dict.get_font_encoding(self.doc).ok())
            .and_then(|encoding| LopdfDocument::decode_text(&encoding, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}
