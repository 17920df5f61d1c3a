//! Content stream interpretation: text operators to positioned spans.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::{BoundingBox, RawLine, RawSpan, StyleFlags};

/// A span together with its baseline in page space (origin bottom-left).
#[derive(Debug, Clone)]
pub(crate) struct PlacedSpan {
    pub span: RawSpan,
    pub baseline: f32,
}

/// Font resources of a page, resolved once per page.
pub(crate) struct PageFonts<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
}

/// Family name and style flags of one font resource.
#[derive(Debug, Clone, Default)]
struct FontInfo {
    family: String,
    flags: StyleFlags,
}

impl<'a> PageFonts<'a> {
    pub(crate) fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self { doc, fonts }
    }

    fn info(&self, resource_name: &[u8]) -> FontInfo {
        let Some(font) = self.fonts.get(resource_name) else {
            let family = String::from_utf8_lossy(resource_name).to_string();
            let flags = StyleFlags::from_font_name(&family);
            return FontInfo { family, flags };
        };

        let base_font = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let family = strip_subset_prefix(&base_font).to_string();
        let flags = StyleFlags::from_font_name(&family) | self.descriptor_flags(font);

        FontInfo { family, flags }
    }

    /// Style bits declared in the font descriptor (weight, ForceBold, Italic,
    /// Serif, FixedPitch).
    fn descriptor_flags(&self, font: &Dictionary) -> StyleFlags {
        let descriptor = match font.get(b"FontDescriptor") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };
        let Some(descriptor) = descriptor else {
            return StyleFlags::empty();
        };

        let mut flags = StyleFlags::empty();
        let weight = descriptor.get(b"FontWeight").ok().and_then(get_number);
        if weight.is_some_and(|w| w >= 600.0) {
            flags |= StyleFlags::BOLD;
        }

        let bits = descriptor
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        if bits & (1 << 18) != 0 {
            flags |= StyleFlags::BOLD;
        }
        if bits & (1 << 6) != 0 {
            flags |= StyleFlags::ITALIC;
        }
        if bits & (1 << 1) != 0 {
            flags |= StyleFlags::SERIFED;
        }
        if bits & 1 != 0 {
            flags |= StyleFlags::MONOSPACED;
        }
        flags
    }

    fn decode(&self, resource_name: &[u8], bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(resource_name)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }
}

/// Walk a page content stream and collect text spans.
///
/// `page_height` converts PDF coordinates to a top-left origin for the
/// bounding boxes.
pub(crate) fn extract_spans(
    content: &[u8],
    fonts: &PageFonts<'_>,
    page_height: f32,
) -> Result<Vec<PlacedSpan>> {
    let content = Content::decode(content).map_err(|e| Error::TextExtract(e.to_string()))?;

    let mut spans = Vec::new();
    let mut font_resource: Vec<u8> = Vec::new();
    let mut font = FontInfo::default();
    let mut font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut ctm = Matrix::IDENTITY;
    let mut ctm_stack: Vec<Matrix> = Vec::new();
    let mut in_text_block = false;

    for op in content.operations {
        let text = match op.operator.as_str() {
            "q" => {
                ctm_stack.push(ctm);
                None
            }
            "Q" => {
                if let Some(saved) = ctm_stack.pop() {
                    ctm = saved;
                }
                None
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(&op.operands) {
                    ctm = m.multiply(&ctm);
                }
                None
            }
            "BT" => {
                in_text_block = true;
                matrix.reset();
                None
            }
            "ET" => {
                in_text_block = false;
                None
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        font_resource = name.clone();
                        font = fonts.info(name);
                    }
                    font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
                None
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number) {
                    matrix.leading = leading;
                }
                None
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
                None
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(&op.operands) {
                    matrix.set(m);
                }
                None
            }
            "T*" => {
                matrix.next_line();
                None
            }
            "Tj" => match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(fonts.decode(&font_resource, bytes)),
                _ => None,
            },
            "TJ" => match op.operands.first() {
                Some(Object::Array(items)) => Some(show_array(items, fonts, &font_resource)),
                _ => None,
            },
            "'" | "\"" => {
                matrix.next_line();
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                match op.operands.get(text_idx) {
                    Some(Object::String(bytes, _)) => Some(fonts.decode(&font_resource, bytes)),
                    _ => None,
                }
            }
            _ => None,
        };

        let Some(text) = text else { continue };
        if !in_text_block || text.trim().is_empty() {
            continue;
        }

        // Text rendering matrix in page space.
        let trm = matrix.current().multiply(&ctm);
        let size = font_size * trm.scale();
        let (x, y) = (trm.e, trm.f);
        let width = estimate_width(&text, size);
        let bbox = BoundingBox::new(
            x,
            page_height - (y + size * 0.8),
            x + width,
            page_height - (y - size * 0.2),
        );
        spans.push(PlacedSpan {
            span: RawSpan::new(text.clone(), size, font.family.clone(), bbox).with_flags(font.flags),
            baseline: y,
        });
        matrix.advance(estimate_width(&text, font_size));
    }

    Ok(spans)
}

/// Decode a TJ array, turning large negative kerning into word spaces.
fn show_array(items: &[Object], fonts: &PageFonts<'_>, font_resource: &[u8]) -> String {
    // Adjustments are in 1/1000 text space units; ~200 is a word gap.
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&fonts.decode(font_resource, bytes)),
            other => {
                let Some(adjustment) = get_number(other).map(|n| -n) else {
                    continue;
                };
                let ends_with_space = combined.ends_with(' ') || combined.ends_with('\u{00A0}');
                if adjustment > SPACE_THRESHOLD
                    && !ends_with_space
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !is_spaceless_script_char(c))
                {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Group spans into lines by baseline, top to bottom, spans left to right.
pub(crate) fn group_into_lines(mut spans: Vec<PlacedSpan>, page_index: u32) -> Vec<RawLine> {
    spans.sort_by(|a, b| {
        b.baseline
            .total_cmp(&a.baseline)
            .then(a.span.bbox.x0.total_cmp(&b.span.bbox.x0))
    });

    let mut lines: Vec<RawLine> = Vec::new();
    let mut current: Vec<PlacedSpan> = Vec::new();

    for span in spans {
        let tolerance = span.span.size * 0.3;
        let same_line = current
            .first()
            .is_some_and(|first| (span.baseline - first.baseline).abs() <= tolerance);
        if !same_line && !current.is_empty() {
            lines.push(finish_line(std::mem::take(&mut current), page_index));
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(finish_line(current, page_index));
    }

    lines
}

fn finish_line(mut spans: Vec<PlacedSpan>, page_index: u32) -> RawLine {
    spans.sort_by(|a, b| a.span.bbox.x0.total_cmp(&b.span.bbox.x0));
    RawLine::new(page_index, spans.into_iter().map(|p| p.span).collect())
}

/// Affine transform `[a b c d e f]`, as set by `cm` and `Tm`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let n: Vec<f32> = operands.iter().take(6).filter_map(get_number).collect();
        match n[..] {
            [a, b, c, d, e, f] => Some(Self { a, b, c, d, e, f }),
            _ => None,
        }
    }

    /// Apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Text and line matrices of a text object.
#[derive(Debug, Clone)]
struct TextMatrix {
    m: Matrix,
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            m: Matrix::IDENTITY,
            line_e: 0.0,
            line_f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn reset(&mut self) {
        *self = Self {
            leading: self.leading,
            ..Self::default()
        };
    }

    fn set(&mut self, m: Matrix) {
        self.m = m;
        self.line_e = m.e;
        self.line_f = m.f;
    }

    /// Move to the start of the next line, offset from the current line start.
    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.m.a + ty * self.m.c;
        self.line_f += tx * self.m.b + ty * self.m.d;
        self.m.e = self.line_e;
        self.m.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Advance the pen by a text-space width.
    fn advance(&mut self, width: f32) {
        self.m.e += width * self.m.a;
        self.m.f += width * self.m.b;
    }

    fn current(&self) -> Matrix {
        self.m
    }
}

/// Rough advance width: half an em per character.
fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Remove a subset tag such as "ABCDEF+" from a font name.
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => {
            rest
        }
        _ => name,
    }
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces
/// (Han ideographs, kana, CJK punctuation). Hangul uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Fallback decoding when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(text: &str, x: f32, baseline: f32, size: f32) -> PlacedSpan {
        PlacedSpan {
            span: RawSpan::new(
                text,
                size,
                "Helvetica",
                BoundingBox::new(x, 0.0, x + 10.0, size),
            ),
            baseline,
        }
    }

    #[test]
    fn test_group_into_lines_orders_top_to_bottom() {
        let spans = vec![
            placed("second", 72.0, 600.0, 12.0),
            placed("world", 140.0, 700.5, 12.0),
            placed("hello", 72.0, 700.0, 12.0),
        ];
        let lines = group_into_lines(spans, 2);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page_index, 2);
        let first: Vec<_> = lines[0].spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(first, vec!["hello", "world"]);
        assert_eq!(lines[1].spans[0].text, "second");
    }

    #[test]
    fn test_text_matrix_moves() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        m.advance(30.0);
        assert_eq!((m.current().e, m.current().f), (102.0, 700.0));

        m.leading = 14.0;
        m.next_line();
        assert_eq!((m.current().e, m.current().f), (72.0, 686.0));

        m.set(Matrix {
            a: 2.0,
            d: 2.0,
            e: 10.0,
            f: 20.0,
            ..Matrix::IDENTITY
        });
        m.advance(5.0);
        assert_eq!(m.current().e, 20.0);
        assert!((m.current().scale() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_matrix_composes_with_ctm() {
        let flip = Matrix {
            d: -1.0,
            f: 792.0,
            ..Matrix::IDENTITY
        };
        let text = Matrix {
            e: 72.0,
            f: 100.0,
            ..Matrix::IDENTITY
        };
        let trm = text.multiply(&flip);
        assert_eq!((trm.e, trm.f), (72.0, 692.0));

        let scale = Matrix {
            a: 2.0,
            d: 2.0,
            ..Matrix::IDENTITY
        };
        let trm = text.multiply(&scale);
        assert_eq!((trm.e, trm.f), (144.0, 200.0));
        assert!((trm.scale() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_matrix_from_operands() {
        let operands: Vec<Object> = vec![
            1.into(),
            0.into(),
            0.into(),
            Object::Real(-1.0),
            0.into(),
            792.into(),
        ];
        let m = Matrix::from_operands(&operands).unwrap();
        assert_eq!(m.d, -1.0);
        assert_eq!(m.f, 792.0);
        assert!(Matrix::from_operands(&operands[..4]).is_none());
    }

    #[test]
    fn test_strip_subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Arial-BoldMT"), "Arial-BoldMT");
        assert_eq!(strip_subset_prefix("Arial+Extra"), "Arial+Extra");
        assert_eq!(strip_subset_prefix("Helvetica"), "Helvetica");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x43, 0x61, 0x66, 0xE9]), "Caf\u{e9}");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('あ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
