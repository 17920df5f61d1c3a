//! Plain text rendering for outlines.

use std::fmt::Write;

use crate::model::Outline;

/// Render an outline as an indented table of contents.
///
/// The title is printed first, followed by one line per entry indented two
/// spaces per level below H1, with the page number right after the text.
pub fn to_text(outline: &Outline) -> String {
    let mut output = String::new();

    if !outline.title.is_empty() {
        output.push_str(&outline.title);
        output.push('\n');
    }

    for entry in &outline.entries {
        let indent = "  ".repeat(usize::from(entry.level.depth() - 1));
        // Writing to a String cannot fail
        let _ = writeln!(
            output,
            "{}{} {} (p. {})",
            indent, entry.level, entry.text, entry.page
        );
    }

    output.trim_end().to_string()
}
