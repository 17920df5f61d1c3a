//! Lexical patterns for noise filtering and heading validity.

use std::ops::RangeInclusive;

use regex::Regex;

/// Compiled lexical patterns used by the classifier.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    /// "page 3 of 10"
    page_counter: Regex,
    /// "version 2.1"
    version_label: Regex,
    /// "14 march 2024"
    date_line: Regex,
    /// Single bullet, dash, asterisk or digit marker followed by whitespace
    bullet: Regex,
    /// Only digits, punctuation and whitespace
    symbolic: Regex,
    /// "unit 3", "chapter iv", "module 2" (matched against lowercase text)
    chapter_label: Regex,
    /// "1. Introduction", "2) Scope"
    numbered_title: Regex,
    /// "1 Overview", "2.3.1 Details"
    sectioned: Regex,
}

impl HeadingPatterns {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            page_counter: Regex::new(r"^page\s+\d+\s+of\s+\d+$").unwrap(),
            version_label: Regex::new(r"^version\s+\d+(\.\d+)*$").unwrap(),
            date_line: Regex::new(r"^\d{1,2}\s+[a-zA-Z]{3,9}\s+\d{4}$").unwrap(),
            bullet: Regex::new(r"^[\x{2022}\-*\d+.]\s+.+").unwrap(),
            symbolic: Regex::new(r"^[\d\W_]+$").unwrap(),
            chapter_label: Regex::new(r"^(unit|chapter|module)\s+[\divx]+").unwrap(),
            numbered_title: Regex::new(r"^\d+[.)]\s+[A-Z].+").unwrap(),
            sectioned: Regex::new(r"^\d+(\.\d+)*\s+.+").unwrap(),
        }
    }

    /// Page counters, version labels and bare dates.
    pub fn is_noise(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.page_counter.is_match(&text)
            || self.version_label.is_match(&text)
            || self.date_line.is_match(&text)
    }

    /// Bulleted or enumerated list item.
    pub fn is_bullet(&self, text: &str) -> bool {
        self.bullet.is_match(text.trim())
    }

    /// Text made only of digits, punctuation and whitespace.
    pub fn is_symbolic(&self, text: &str) -> bool {
        self.symbolic.is_match(text)
    }

    /// "Unit", "Chapter" or "Module" followed by an arabic or roman numeral.
    pub fn is_chapter_label(&self, text: &str) -> bool {
        self.chapter_label.is_match(&text.trim().to_lowercase())
    }

    /// Enumerated title such as "1. Introduction" or "2) Scope".
    pub fn is_numbered_title(&self, text: &str) -> bool {
        self.numbered_title.is_match(text)
    }

    /// Section-numbered text such as "2.3.1 Details".
    pub fn is_sectioned(&self, text: &str) -> bool {
        self.sectioned.is_match(text)
    }

    /// Whether `text` reads like a heading.
    ///
    /// Chapter labels are always valid. Otherwise the text must not be empty,
    /// a list item or noise, must have a word count within `words`, must
    /// contain something other than digits and punctuation, must not end with
    /// sentence punctuation, must not be all lowercase, and must not be a
    /// memo "From:" / "To:" line.
    pub fn is_valid_heading(&self, text: &str, words: RangeInclusive<usize>) -> bool {
        let text = text.trim();
        if text.is_empty() || self.is_bullet(text) || self.is_noise(text) {
            return false;
        }

        let lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();
        let looks_like_heading = words.contains(&word_count)
            && !self.is_symbolic(text)
            && !ends_with_sentence_punctuation(text)
            && !is_all_lowercase(text)
            && !lower.starts_with("from:")
            && !lower.starts_with("to:");

        looks_like_heading || self.is_chapter_label(text)
    }
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self::new()
    }
}

fn ends_with_sentence_punctuation(text: &str) -> bool {
    text.ends_with(&[':', ';', ',', '.'][..])
}

/// At least one cased character and no uppercase ones.
fn is_all_lowercase(text: &str) -> bool {
    text.chars().any(char::is_lowercase) && !text.chars().any(char::is_uppercase)
}
