//! PDF parsing: content streams to spans, spans to tables and text.

mod backend;
mod options;
mod spans;
mod table_detector;

pub use backend::{LopdfBackend, PageSource};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
pub use spans::{collect_spans, decode_text_simple, spans_to_text, GlyphDecoder, TextSpan};
pub use table_detector::{DetectedTable, SpanRow, TableDetector, TableDetectorConfig};
