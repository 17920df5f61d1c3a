//! Document-relative font size to level mapping.

use crate::model::{HeadingLevel, NormalizedRecord};

/// Level a font size maps to within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedLevel {
    /// The largest size in the document
    Title,
    /// One of the next three sizes, or any smaller size (H3)
    Heading(HeadingLevel),
}

impl MappedLevel {
    /// Heading level to use when a mapped level must land in the outline.
    ///
    /// The title size has no outline level of its own and is promoted to H1.
    pub fn as_heading(self) -> HeadingLevel {
        match self {
            MappedLevel::Title => HeadingLevel::H1,
            MappedLevel::Heading(level) => level,
        }
    }
}

const RANKED_LEVELS: [MappedLevel; 4] = [
    MappedLevel::Title,
    MappedLevel::Heading(HeadingLevel::H1),
    MappedLevel::Heading(HeadingLevel::H2),
    MappedLevel::Heading(HeadingLevel::H3),
];

/// The four largest distinct font sizes of a document, ranked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeLevels {
    ranked: Vec<(f64, MappedLevel)>,
}

impl SizeLevels {
    /// Rank the distinct sizes of `records`, largest first.
    ///
    /// Non-finite sizes are never ranked and fall back to H3 on lookup.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let mut sizes: Vec<f64> = records
            .into_iter()
            .map(|r| r.size)
            .filter(|s| s.is_finite())
            .collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();

        Self {
            ranked: sizes.into_iter().zip(RANKED_LEVELS).collect(),
        }
    }

    /// Level for a font size; sizes outside the top four map to H3.
    pub fn level_for(&self, size: f64) -> MappedLevel {
        self.ranked
            .iter()
            .find(|(ranked_size, _)| *ranked_size == size)
            .map(|(_, level)| *level)
            .unwrap_or(MappedLevel::Heading(HeadingLevel::H3))
    }

    /// Number of ranked sizes (at most four).
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Check if no size was ranked.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Font size mapped to the title level, if any.
    pub fn title_size(&self) -> Option<f64> {
        self.ranked.first().map(|(size, _)| *size)
    }
}
