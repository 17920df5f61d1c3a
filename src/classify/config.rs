//! Classifier configuration.

use std::ops::RangeInclusive;

use super::rules::OutlineRule;

/// Tunable parameters of the heading classifier.
///
/// The defaults reproduce the heuristics tuned for US Letter / A4 pages in
/// PDF point space. The centering band in particular is page-size dependent.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Left edge must be strictly greater than this to count as centered
    pub center_min_x: f32,

    /// Left edge must be strictly less than this to count as centered
    pub center_max_x: f32,

    /// Minimum word count of a valid heading
    pub min_words: usize,

    /// Maximum word count of a valid heading
    pub max_words: usize,

    /// Minimum word count of a bold heading that ends with a colon
    pub min_colon_heading_words: usize,

    /// Outline rules, evaluated first-match-wins
    pub rules: Vec<OutlineRule>,
}

impl ClassifierConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal band (exclusive) that counts as centered.
    pub fn with_center_band(mut self, min_x: f32, max_x: f32) -> Self {
        self.center_min_x = min_x;
        self.center_max_x = max_x;
        self
    }

    /// Set the accepted word count range of a valid heading.
    pub fn with_word_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.min_words = *range.start();
        self.max_words = *range.end();
        self
    }

    /// Set the minimum word count for colon-terminated bold headings.
    pub fn with_min_colon_heading_words(mut self, words: usize) -> Self {
        self.min_colon_heading_words = words;
        self
    }

    /// Replace the outline rule list.
    pub fn with_rules(mut self, rules: Vec<OutlineRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Accepted word count range.
    pub fn word_range(&self) -> RangeInclusive<usize> {
        self.min_words..=self.max_words
    }

    /// Whether a left edge falls inside the centering band.
    pub fn is_centered(&self, x0: f32) -> bool {
        self.center_min_x < x0 && x0 < self.center_max_x
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            center_min_x: 200.0,
            center_max_x: 400.0,
            min_words: 2,
            max_words: 25,
            min_colon_heading_words: 4,
            rules: OutlineRule::DEFAULT_ORDER.to_vec(),
        }
    }
}
