//! Data model shared by the extractor and the renderers.
//!
//! [`RawTable`] is what a PDF backend hands back per page, [`Extraction`]
//! collects those across a document, and [`TabularResult`] is the cleaned
//! header + body structure that gets exported.

mod extraction;
mod result;
mod table;

pub use extraction::Extraction;
pub use result::{Cell, Origin, TabularResult};
pub use table::{RawRow, RawTable};
