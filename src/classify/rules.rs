//! Outline entry rules, evaluated in priority order.

use crate::model::HeadingLevel;

use super::levels::MappedLevel;

/// Per-record predicates the rules are evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    /// Trimmed record text
    pub text: &'a str,
    /// Bold flag of the record
    pub is_bold: bool,
    /// Left edge within the centering band
    pub is_centered: bool,
    /// Bold, bold font family, or centered
    pub is_styled: bool,
    /// Whether the text reads like a heading
    pub is_valid: bool,
    /// Level of the record's font size
    pub mapped: MappedLevel,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Text starts with an enumerator and a capitalized word ("1. Introduction")
    pub is_numbered_title: bool,
    /// Text starts with a dotted section number ("2.3 Scope")
    pub is_sectioned: bool,
    /// Text starts with a unit, chapter or module label
    pub is_chapter_label: bool,
}

/// A structural rule that may turn a record into an outline entry.
///
/// Rules are tried in order and the first match decides the entry level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineRule {
    /// Bold enumerated title ("1. Introduction") becomes H3.
    NumberedBold,
    /// Centered, bold, valid heading becomes H1.
    CenteredBold,
    /// Bold lead-in of enough words ending with a colon becomes H2.
    BoldColon,
    /// Section-numbered text takes its size level.
    Sectioned,
    /// Valid, styled text at the H1 or H2 size takes its size level.
    SizeMapped,
    /// Unit, chapter or module label becomes H2.
    ChapterLabel,
}

impl OutlineRule {
    /// Default rule priority.
    pub const DEFAULT_ORDER: [OutlineRule; 6] = [
        OutlineRule::NumberedBold,
        OutlineRule::CenteredBold,
        OutlineRule::BoldColon,
        OutlineRule::Sectioned,
        OutlineRule::SizeMapped,
        OutlineRule::ChapterLabel,
    ];

    /// Level this rule assigns to the candidate, or `None` if it does not apply.
    pub fn evaluate(self, c: &Candidate<'_>, min_colon_words: usize) -> Option<HeadingLevel> {
        match self {
            OutlineRule::NumberedBold => {
                (c.is_numbered_title && c.is_bold).then_some(HeadingLevel::H3)
            }
            OutlineRule::CenteredBold => {
                (c.is_centered && c.is_bold && c.is_valid).then_some(HeadingLevel::H1)
            }
            OutlineRule::BoldColon => (c.is_bold
                && c.text.ends_with(':')
                && c.word_count >= min_colon_words)
                .then_some(HeadingLevel::H2),
            OutlineRule::Sectioned => c.is_sectioned.then(|| c.mapped.as_heading()),
            OutlineRule::SizeMapped => match c.mapped {
                MappedLevel::Heading(level @ (HeadingLevel::H1 | HeadingLevel::H2))
                    if c.is_valid && c.is_styled =>
                {
                    Some(level)
                }
                _ => None,
            },
            OutlineRule::ChapterLabel => c.is_chapter_label.then_some(HeadingLevel::H2),
        }
    }

    /// Short identifier used in logs.
    pub fn name(self) -> &'static str {
        match self {
            OutlineRule::NumberedBold => "numbered-bold",
            OutlineRule::CenteredBold => "centered-bold",
            OutlineRule::BoldColon => "bold-colon",
            OutlineRule::Sectioned => "sectioned",
            OutlineRule::SizeMapped => "size-mapped",
            OutlineRule::ChapterLabel => "chapter-label",
        }
    }
}

/// Evaluate `rules` in order and return the first matching rule and level.
pub fn first_match(
    rules: &[OutlineRule],
    candidate: &Candidate<'_>,
    min_colon_words: usize,
) -> Option<(OutlineRule, HeadingLevel)> {
    rules.iter().find_map(|rule| {
        rule.evaluate(candidate, min_colon_words)
            .map(|level| (*rule, level))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Candidate<'_> {
        Candidate {
            text,
            is_bold: false,
            is_centered: false,
            is_styled: false,
            is_valid: false,
            mapped: MappedLevel::Heading(HeadingLevel::H3),
            word_count: text.split_whitespace().count(),
            is_numbered_title: false,
            is_sectioned: false,
            is_chapter_label: false,
        }
    }

    #[test]
    fn test_numbered_bold_beats_size_mapping() {
        let c = Candidate {
            is_bold: true,
            is_styled: true,
            is_valid: true,
            is_numbered_title: true,
            mapped: MappedLevel::Heading(HeadingLevel::H1),
            ..plain("1. Introduction")
        };
        assert_eq!(
            first_match(&OutlineRule::DEFAULT_ORDER, &c, 4),
            Some((OutlineRule::NumberedBold, HeadingLevel::H3))
        );
        assert_eq!(
            OutlineRule::SizeMapped.evaluate(&c, 4),
            Some(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_centered_bold_requires_validity() {
        let c = Candidate {
            is_bold: true,
            is_centered: true,
            is_styled: true,
            ..plain("Overview")
        };
        assert_eq!(OutlineRule::CenteredBold.evaluate(&c, 4), None);

        let c = Candidate { is_valid: true, ..c };
        assert_eq!(
            OutlineRule::CenteredBold.evaluate(&c, 4),
            Some(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_bold_colon_word_threshold() {
        let short = Candidate {
            is_bold: true,
            ..plain("Key points:")
        };
        assert_eq!(OutlineRule::BoldColon.evaluate(&short, 4), None);

        let long = Candidate {
            is_bold: true,
            ..plain("The following items apply:")
        };
        assert_eq!(
            OutlineRule::BoldColon.evaluate(&long, 4),
            Some(HeadingLevel::H2)
        );
    }

    #[test]
    fn test_sectioned_uses_mapped_level() {
        let c = Candidate {
            is_sectioned: true,
            mapped: MappedLevel::Heading(HeadingLevel::H2),
            ..plain("2.1 Scope")
        };
        assert_eq!(
            OutlineRule::Sectioned.evaluate(&c, 4),
            Some(HeadingLevel::H2)
        );

        let c = Candidate {
            mapped: MappedLevel::Title,
            ..c
        };
        assert_eq!(
            OutlineRule::Sectioned.evaluate(&c, 4),
            Some(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_size_mapped_only_for_h1_h2() {
        let c = Candidate {
            is_valid: true,
            is_styled: true,
            mapped: MappedLevel::Heading(HeadingLevel::H3),
            ..plain("Background Notes")
        };
        assert_eq!(OutlineRule::SizeMapped.evaluate(&c, 4), None);

        let c = Candidate {
            mapped: MappedLevel::Title,
            ..c
        };
        assert_eq!(OutlineRule::SizeMapped.evaluate(&c, 4), None);

        let c = Candidate {
            mapped: MappedLevel::Heading(HeadingLevel::H2),
            ..c
        };
        assert_eq!(
            OutlineRule::SizeMapped.evaluate(&c, 4),
            Some(HeadingLevel::H2)
        );
    }

    #[test]
    fn test_chapter_label_is_h2() {
        let c = Candidate {
            is_chapter_label: true,
            ..plain("chapter iv")
        };
        assert_eq!(
            first_match(&OutlineRule::DEFAULT_ORDER, &c, 4),
            Some((OutlineRule::ChapterLabel, HeadingLevel::H2))
        );
    }

    #[test]
    fn test_no_rule_matches_body_text() {
        let c = plain("some body text here.");
        assert_eq!(first_match(&OutlineRule::DEFAULT_ORDER, &c, 4), None);
    }
}
