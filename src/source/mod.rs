//! Span sources: the text-extraction engines that feed the normalizer.
//!
//! Outline classification only needs ordered [`RawLine`]s. Any engine that can
//! produce them implements [`SpanSource`]; [`PdfSpanSource`] reads them from
//! PDF content streams.

mod content;
mod pdf;

pub use pdf::PdfSpanSource;

use crate::error::Result;
use crate::model::RawLine;

/// Producer of styled text lines in reading order.
pub trait SpanSource {
    /// All lines of the document, page by page, top to bottom.
    fn lines(&self) -> Result<Vec<RawLine>>;
}

/// Pre-extracted lines, e.g. from another engine or a fixture.
impl SpanSource for [RawLine] {
    fn lines(&self) -> Result<Vec<RawLine>> {
        Ok(self.to_vec())
    }
}

impl SpanSource for Vec<RawLine> {
    fn lines(&self) -> Result<Vec<RawLine>> {
        Ok(self.clone())
    }
}
