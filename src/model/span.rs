//! Raw text spans as produced by a text-extraction engine.

use serde::{Deserialize, Serialize};

/// Bit-encoded span style flags.
///
/// Bit layout: superscript = 1, italic = 2, serifed = 4, monospaced = 8,
/// bold = 16. Only the span source and the normalizer look at these bits;
/// everything downstream works with [`NormalizedRecord::bold`].
///
/// [`NormalizedRecord::bold`]: super::NormalizedRecord::bold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    /// Superscript text.
    pub const SUPERSCRIPT: StyleFlags = StyleFlags(1);
    /// Italic or oblique face.
    pub const ITALIC: StyleFlags = StyleFlags(1 << 1);
    /// Serifed face.
    pub const SERIFED: StyleFlags = StyleFlags(1 << 2);
    /// Monospaced face.
    pub const MONOSPACED: StyleFlags = StyleFlags(1 << 3);
    /// Bold face.
    pub const BOLD: StyleFlags = StyleFlags(1 << 4);

    /// No flags set.
    pub const fn empty() -> Self {
        StyleFlags(0)
    }

    /// Check whether all bits of `other` are set.
    pub const fn contains(self, other: StyleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the bold bit is set.
    pub const fn is_bold(self) -> bool {
        self.contains(Self::BOLD)
    }

    /// Whether the italic bit is set.
    pub const fn is_italic(self) -> bool {
        self.contains(Self::ITALIC)
    }

    /// Infer flags from a font name such as "Helvetica-BoldOblique".
    pub fn from_font_name(font_name: &str) -> Self {
        let lower = font_name.to_lowercase();
        let mut flags = StyleFlags::empty();
        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            flags |= Self::BOLD;
        }
        if lower.contains("italic") || lower.contains("oblique") {
            flags |= Self::ITALIC;
        }
        if lower.contains("courier") || lower.contains("mono") {
            flags |= Self::MONOSPACED;
        }
        if lower.contains("times") || (lower.contains("serif") && !lower.contains("sans")) {
            flags |= Self::SERIFED;
        }
        flags
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = StyleFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        StyleFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for StyleFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Axis-aligned bounding box in page space (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }
}

/// A contiguous run of text sharing one font, size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// The text content, untrimmed
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font family name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Style flags
    pub flags: StyleFlags,
    /// Position on the page
    pub bbox: BoundingBox,
}

impl RawSpan {
    /// Create a span at the given box with no style flags.
    pub fn new(
        text: impl Into<String>,
        size: f32,
        font: impl Into<String>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
            flags: StyleFlags::empty(),
            bbox,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A visual row: one or more spans on the same baseline of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// 0-based index of the containing page
    pub page_index: u32,
    /// Spans in reading order
    pub spans: Vec<RawSpan>,
}

impl RawLine {
    /// Create a line on the given 0-based page.
    pub fn new(page_index: u32, spans: Vec<RawSpan>) -> Self {
        Self { page_index, spans }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_flags_from_font_name() {
        let flags = StyleFlags::from_font_name("Helvetica-Bold");
        assert!(flags.is_bold());
        assert!(!flags.is_italic());

        let flags = StyleFlags::from_font_name("Helvetica-Oblique");
        assert!(!flags.is_bold());
        assert!(flags.is_italic());

        let flags = StyleFlags::from_font_name("Arial-BlackItalic");
        assert!(flags.is_bold());
        assert!(flags.is_italic());
    }

    #[test]
    fn test_style_flags_bits() {
        assert_eq!(StyleFlags::BOLD.0, 16);
        assert_eq!(StyleFlags::ITALIC.0, 2);
        let flags = StyleFlags::ITALIC | StyleFlags::BOLD;
        assert!(flags.contains(StyleFlags::BOLD));
        assert!(!StyleFlags::ITALIC.is_bold());
    }

    #[test]
    fn test_bounding_box_width() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 32.0);
        assert!((bbox.width() - 100.0).abs() < f32::EPSILON);
    }
}
