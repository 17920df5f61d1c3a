//! Data model for outline extraction.
//!
//! Data flows one way: [`RawLine`]s from a text-extraction engine are reduced
//! to [`NormalizedRecord`]s, which the classifier folds into an [`Outline`].
//! All three are built once per document and never mutated afterwards.

mod outline;
mod record;
mod span;

pub use outline::{HeadingLevel, Outline, OutlineEntry};
pub use record::NormalizedRecord;
pub use span::{BoundingBox, RawLine, RawSpan, StyleFlags};
