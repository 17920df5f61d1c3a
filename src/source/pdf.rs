//! PDF span source built on lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::{pdf_version, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::RawLine;
use crate::options::{ErrorMode, PageSelection};

use super::content::{extract_spans, group_into_lines, PageFonts};
use super::SpanSource;

/// US Letter height, used when a page declares no usable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Reads styled text lines from a PDF document.
pub struct PdfSpanSource {
    doc: LopdfDocument,
    pages: PageSelection,
    error_mode: ErrorMode,
}

impl PdfSpanSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let version = pdf_version_from_path(path)?;
        log::debug!("Opening {} (PDF {})", path.display(), version);

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self {
            doc,
            pages: PageSelection::All,
            error_mode: ErrorMode::Strict,
        })
    }

    /// Restrict extraction to the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract the lines of one page (1-indexed).
    pub fn page_lines(&self, page_num: u32) -> Result<Vec<RawLine>> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let fonts = PageFonts::new(&self.doc, fonts);

        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        let spans = extract_spans(&content, &fonts, self.page_height(page_id))?;
        Ok(group_into_lines(spans, page_num - 1))
    }

    fn page_height(&self, page_id: ObjectId) -> f32 {
        self.doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|page| page.get(b"MediaBox").ok())
            .and_then(|media_box| media_box.as_array().ok())
            .filter(|array| array.len() >= 4)
            .and_then(|array| {
                let bottom = array[1].as_float().ok()?;
                let top = array[3].as_float().ok()?;
                Some(top - bottom)
            })
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }
}

impl SpanSource for PdfSpanSource {
    fn lines(&self) -> Result<Vec<RawLine>> {
        let mut lines = Vec::new();

        for page_num in self.doc.get_pages().into_keys() {
            if !self.pages.includes(page_num) {
                continue;
            }

            match self.page_lines(page_num) {
                Ok(page_lines) => lines.extend(page_lines),
                Err(e) if self.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", page_num, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(lines)
    }
}
