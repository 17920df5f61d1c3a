//! Heading classification.
//!
//! Turns the ordered [`NormalizedRecord`]s of one document into an
//! [`Outline`]. Classification runs in four steps:
//!
//! 1. Records that are empty or look like page counters, version labels or
//!    bare dates are dropped.
//! 2. The distinct font sizes of the remaining records are ranked; the four
//!    largest map to title, H1, H2 and H3.
//! 3. Records are folded in document order. Duplicates (same lowercase text on
//!    the same page) are skipped, the first styled, valid record at the title
//!    size becomes the title, and every other record is offered to the
//!    [`OutlineRule`]s, first match wins.
//! 4. Without a captured title, the caller's fallback title is used.
//!
//! Classification is a total function: it never fails and never panics on
//! degenerate input.

mod config;
mod levels;
mod patterns;
mod rules;

pub use config::ClassifierConfig;
pub use levels::{MappedLevel, SizeLevels};
pub use patterns::HeadingPatterns;
pub use rules::{first_match, Candidate, OutlineRule};

use std::collections::HashSet;

use crate::model::{NormalizedRecord, Outline, OutlineEntry};

/// Classify `records` with the default configuration.
pub fn classify(records: &[NormalizedRecord], fallback_title: &str) -> Outline {
    Classifier::new().classify(records, fallback_title)
}

/// Heading classifier holding its configuration and compiled patterns.
///
/// A classifier carries no per-document state and can be shared across
/// threads to classify many documents concurrently.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    patterns: HeadingPatterns,
}

/// Running state threaded through the per-record fold.
#[derive(Debug, Default)]
struct FoldState {
    seen: HashSet<(String, u32)>,
    title: Option<String>,
    entries: Vec<OutlineEntry>,
}

impl Classifier {
    /// Create a classifier with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create a classifier with a custom configuration.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            patterns: HeadingPatterns::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether `text` is a page counter, version label or bare date.
    pub fn is_noise(&self, text: &str) -> bool {
        self.patterns.is_noise(text)
    }

    /// Whether `text` reads like a heading.
    pub fn is_valid_heading(&self, text: &str) -> bool {
        self.patterns.is_valid_heading(text, self.config.word_range())
    }

    /// Build the outline of one document.
    ///
    /// `fallback_title` (typically the file stem) is used, trimmed, when no
    /// record qualifies as the title. A document with no usable records
    /// yields an empty title and no entries.
    pub fn classify(&self, records: &[NormalizedRecord], fallback_title: &str) -> Outline {
        let surviving: Vec<&NormalizedRecord> = records
            .iter()
            .filter(|r| !r.text.trim().is_empty() && !self.is_noise(&r.text))
            .collect();

        if surviving.is_empty() {
            log::debug!("No classifiable records ({} dropped as noise)", records.len());
            return Outline::empty();
        }

        let levels = SizeLevels::from_records(surviving.iter().copied());
        log::debug!(
            "Ranked {} font sizes, title size {:?}",
            levels.len(),
            levels.title_size()
        );

        let state = surviving
            .into_iter()
            .fold(FoldState::default(), |state, record| self.step(state, record, &levels));

        let title = match state.title {
            Some(title) => title,
            None => {
                log::debug!("No title candidate, falling back to {:?}", fallback_title);
                fallback_title.to_string()
            }
        };

        log::debug!("Classified outline with {} entries", state.entries.len());
        Outline::new(title.trim(), state.entries)
    }

    /// Fold one record into the running state.
    fn step(
        &self,
        mut state: FoldState,
        record: &NormalizedRecord,
        levels: &SizeLevels,
    ) -> FoldState {
        let text = record.text.trim();
        if !state.seen.insert((text.to_lowercase(), record.page)) {
            return state;
        }

        let candidate = self.candidate(text, record, levels);

        if state.title.is_none()
            && candidate.mapped == MappedLevel::Title
            && candidate.is_valid
            && candidate.is_styled
        {
            state.title = Some(text.to_string());
            return state;
        }

        if let Some((rule, level)) = first_match(
            &self.config.rules,
            &candidate,
            self.config.min_colon_heading_words,
        ) {
            log::trace!("{} -> {} via {}", text, level, rule.name());
            state.entries.push(OutlineEntry::new(level, text, record.page));
        }

        state
    }

    fn candidate<'a>(
        &self,
        text: &'a str,
        record: &NormalizedRecord,
        levels: &SizeLevels,
    ) -> Candidate<'a> {
        let is_bold = record.bold;
        let is_centered = self.config.is_centered(record.x0);
        Candidate {
            text,
            is_bold,
            is_centered,
            is_styled: is_bold || record.has_bold_font() || is_centered,
            is_valid: self.is_valid_heading(text),
            mapped: levels.level_for(record.size),
            word_count: text.split_whitespace().count(),
            is_numbered_title: self.patterns.is_numbered_title(text),
            is_sectioned: self.patterns.is_sectioned(text),
            is_chapter_label: self.patterns.is_chapter_label(text),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
