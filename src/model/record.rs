//! Normalized per-line records, the unit of heading classification.

use serde::{Deserialize, Serialize};

/// One line of text reduced to the attributes the classifier looks at.
///
/// Records are built by [`normalize`](crate::normalize::normalize) and always
/// carry non-empty trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Space-joined, trimmed span texts
    pub text: String,
    /// Mean span font size, rounded to 2 decimals
    pub size: f64,
    /// Font family of the first contributing span
    pub font: String,
    /// Bold bit set, or "bold" in the font family name
    pub bold: bool,
    /// Left edge of the first contributing span
    pub x0: f32,
    /// 1-based page number
    pub page: u32,
}

impl NormalizedRecord {
    /// Create a record with an empty font name.
    pub fn new(text: impl Into<String>, size: f64, bold: bool, x0: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            size,
            font: String::new(),
            bold,
            x0,
            page,
        }
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Whether the font family name mentions a bold face.
    pub fn has_bold_font(&self) -> bool {
        self.font.to_lowercase().contains("bold")
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
