//! Span normalization: one [`NormalizedRecord`] per non-empty line.

use crate::model::{NormalizedRecord, RawLine, RawSpan};

/// Reduce raw lines to normalized records, preserving their order.
///
/// Lines whose spans carry no text after trimming produce no record. Only
/// spans that contribute text are used for size, font, boldness and position.
pub fn normalize(lines: &[RawLine]) -> Vec<NormalizedRecord> {
    lines.iter().filter_map(normalize_line).collect()
}

/// Normalize a single line, or `None` when it has no text.
pub fn normalize_line(line: &RawLine) -> Option<NormalizedRecord> {
    let contributing: Vec<&RawSpan> = line
        .spans
        .iter()
        .filter(|s| !s.text.trim().is_empty())
        .collect();

    let text = contributing
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let size = mean_size(&contributing);
    let first = contributing.first();
    let font = first.map(|s| s.font.clone()).unwrap_or_default();
    let bbox = first.map(|s| s.bbox).unwrap_or_default();
    let bold = first
        .map(|s| s.flags.is_bold() || s.font.to_lowercase().contains("bold"))
        .unwrap_or(false);

    Some(NormalizedRecord {
        text: text.to_string(),
        size,
        font,
        bold,
        x0: bbox.x0,
        page: line.page_index + 1,
    })
}

/// Arithmetic mean of span sizes rounded to 2 decimals, 0 for no spans.
fn mean_size(spans: &[&RawSpan]) -> f64 {
    if spans.is_empty() {
        return 0.0;
    }
    let total: f64 = spans.iter().map(|s| f64::from(s.size)).sum();
    round2(total / spans.len() as f64)
}

/// Round to 2 decimals, ties to even (10.125 -> 10.12).
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, StyleFlags};

    fn span(text: &str, size: f32, font: &str, x0: f32) -> RawSpan {
        RawSpan::new(text, size, font, BoundingBox::new(x0, 100.0, x0 + 50.0, 112.0))
    }

    #[test]
    fn test_merges_spans_with_single_spaces() {
        let line = RawLine::new(
            0,
            vec![
                span("  Annual ", 24.0, "Arial", 250.0),
                span("", 30.0, "Other", 10.0),
                span("Report", 23.0, "Arial", 320.0),
            ],
        );
        let record = normalize_line(&line).unwrap();
        assert_eq!(record.text, "Annual Report");
        assert!((record.size - 23.5).abs() < 1e-9);
        assert_eq!(record.font, "Arial");
        assert!((record.x0 - 250.0).abs() < f32::EPSILON);
        assert_eq!(record.page, 1);
    }

    #[test]
    fn test_skips_blank_lines() {
        let lines = vec![
            RawLine::new(0, vec![span("   ", 12.0, "Arial", 0.0)]),
            RawLine::new(0, vec![]),
            RawLine::new(2, vec![span("Body", 12.0, "Arial", 72.0)]),
        ];
        let records = normalize(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].page, 3);
    }

    #[test]
    fn test_rounds_mean_size() {
        let line = RawLine::new(
            0,
            vec![
                span("a", 10.0, "F", 0.0),
                span("b", 10.0, "F", 0.0),
                span("c", 11.0, "F", 0.0),
            ],
        );
        let record = normalize_line(&line).unwrap();
        assert!((record.size - 10.33).abs() < 1e-9);
    }

    #[test]
    fn test_mean_size_ties_round_to_even() {
        let line = |a: f32, b: f32| {
            RawLine::new(0, vec![span("a", a, "F", 0.0), span("b", b, "F", 0.0)])
        };
        assert_eq!(normalize_line(&line(10.0, 10.25)).unwrap().size, 10.12);
        assert_eq!(normalize_line(&line(10.0, 10.75)).unwrap().size, 10.38);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(10.336), 10.34);
    }

    #[test]
    fn test_bold_from_flags_or_font_name() {
        let flagged = RawLine::new(
            0,
            vec![span("Title", 12.0, "Helvetica", 0.0).with_flags(StyleFlags::BOLD)],
        );
        assert!(normalize_line(&flagged).unwrap().bold);

        let named = RawLine::new(0, vec![span("Title", 12.0, "Arial-BOLDMT", 0.0)]);
        assert!(normalize_line(&named).unwrap().bold);

        let italic = RawLine::new(
            0,
            vec![span("Title", 12.0, "Helvetica", 0.0).with_flags(StyleFlags::ITALIC)],
        );
        assert!(!normalize_line(&italic).unwrap().bold);
    }

    #[test]
    fn test_first_contributing_span_decides_style() {
        let line = RawLine::new(
            0,
            vec![
                span(" ", 40.0, "Ghost-Bold", 5.0).with_flags(StyleFlags::BOLD),
                span("Plain", 12.0, "Times", 90.0),
                span("Bold", 12.0, "Times-Bold", 130.0),
            ],
        );
        let record = normalize_line(&line).unwrap();
        assert_eq!(record.font, "Times");
        assert!(!record.bold);
        assert!((record.x0 - 90.0).abs() < f32::EPSILON);
        assert!((record.size - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_preserves_order() {
        let lines: Vec<RawLine> = ["one", "two", "three"]
            .iter()
            .map(|t| RawLine::new(0, vec![span(t, 12.0, "F", 0.0)]))
            .collect();
        let texts: Vec<_> = normalize(&lines).into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
