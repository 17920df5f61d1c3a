//! # pdfoutline
//!
//! Document outline extraction from PDF files.
//!
//! The library reads the styled text lines of a PDF, reduces each line to a
//! [`NormalizedRecord`], and classifies the records into a title plus an
//! ordered list of H1/H2/H3 headings using font size ranking, boldness,
//! horizontal centering and textual patterns.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Bring your own text engine
//!
//! The classification core does not depend on lopdf. Callers with their own
//! span extraction can build [`RawLine`]s and call [`outline_from_lines`].
//!
//! ## Features
//!
//! - **Heuristic headings**: size ranking, bold/centered title detection,
//!   numbered and sectioned headings
//! - **Noise filtering**: page counters, version labels and bare dates
//! - **Batch processing**: whole directories in parallel with Rayon

pub mod batch;
pub mod classify;
pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{BatchProcessor, BatchReport, FileOutcome};
pub use classify::{classify, Classifier, ClassifierConfig, OutlineRule};
pub use detect::{has_pdf_extension, pdf_version, pdf_version_from_path};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, HeadingLevel, NormalizedRecord, Outline, OutlineEntry, RawLine, RawSpan,
    StyleFlags,
};
pub use normalize::normalize;
pub use options::{ErrorMode, ExtractOptions, PageSelection};
pub use render::JsonFormat;
pub use source::{PdfSpanSource, SpanSource};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// The file stem is used as the title when no line qualifies.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let outline = extract_outline("report.pdf").unwrap();
/// for entry in &outline.entries {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    extract_outline_with_options(path, &ExtractOptions::default())
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_with_options, ExtractOptions, PageSelection};
///
/// let options = ExtractOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20));
/// let outline = extract_outline_with_options("report.pdf", &options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Outline> {
    let path = path.as_ref();
    let source = PdfSpanSource::open(path)?
        .with_pages(options.pages.clone())
        .with_error_mode(options.error_mode);
    let fallback_title = fallback_title(path);
    outline_from_source(&source, &fallback_title, options)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_from_bytes(
    data: &[u8],
    fallback_title: &str,
    options: &ExtractOptions,
) -> Result<Outline> {
    let source = PdfSpanSource::from_bytes(data)?
        .with_pages(options.pages.clone())
        .with_error_mode(options.error_mode);
    outline_from_source(&source, fallback_title, options)
}

/// Normalize and classify lines produced by any text engine.
///
/// # Example
///
/// ```
/// use pdfoutline::{outline_from_lines, BoundingBox, ClassifierConfig, RawLine, RawSpan, StyleFlags};
///
/// let lines = vec![
///     RawLine::new(0, vec![RawSpan::new("Annual Report 2024", 24.0, "Helvetica-Bold",
///         BoundingBox::new(250.0, 40.0, 420.0, 64.0)).with_flags(StyleFlags::BOLD)]),
///     RawLine::new(0, vec![RawSpan::new("Body text goes here", 11.0, "Helvetica",
///         BoundingBox::new(72.0, 100.0, 300.0, 111.0))]),
/// ];
///
/// let outline = outline_from_lines(&lines, "report", &ClassifierConfig::default());
/// assert_eq!(outline.title, "Annual Report 2024");
/// ```
pub fn outline_from_lines(
    lines: &[RawLine],
    fallback_title: &str,
    config: &ClassifierConfig,
) -> Outline {
    let records = normalize(lines);
    Classifier::with_config(config.clone()).classify(&records, fallback_title)
}

/// Read and normalize the lines of a PDF without classifying them.
pub fn extract_records<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Vec<NormalizedRecord>> {
    let source = PdfSpanSource::open(path)?
        .with_pages(options.pages.clone())
        .with_error_mode(options.error_mode);
    Ok(normalize(&source.lines()?))
}

fn outline_from_source<S: SpanSource + ?Sized>(
    source: &S,
    fallback_title: &str,
    options: &ExtractOptions,
) -> Result<Outline> {
    let lines = source.lines()?;
    log::debug!("Read {} lines", lines.len());
    Ok(outline_from_lines(&lines, fallback_title, &options.classifier))
}

/// File stem of `path`, or an empty string.
pub(crate) fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builder for extracting outlines.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::OutlineExtractor;
///
/// let outline = OutlineExtractor::new()
///     .lenient()
///     .with_center_band(180.0, 420.0)
///     .extract("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: ExtractOptions,
}

impl OutlineExtractor {
    /// Create a new extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set the full classifier configuration.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.options = self.options.with_classifier(config);
        self
    }

    /// Set the horizontal band (exclusive) in which a line counts as centered.
    pub fn with_center_band(mut self, min_x: f32, max_x: f32) -> Self {
        self.options.classifier = self.options.classifier.with_center_band(min_x, max_x);
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the outline of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        extract_outline_with_options(path, &self.options)
    }

    /// Extract the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8], fallback_title: &str) -> Result<Outline> {
        extract_outline_from_bytes(data, fallback_title, &self.options)
    }

    /// Build a batch processor sharing these options.
    pub fn batch(&self) -> BatchProcessor {
        BatchProcessor::new(self.options.clone())
    }
}
