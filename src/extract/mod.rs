//! Span and page-text extraction from PDF documents.
//!
//! [`PdfExtractor`] produces the two inputs the pipeline consumes: typographic
//! spans (for profiling and span-based structuring) and per-page text blocks
//! (the structuring fallback).

mod backend;
mod content;
mod header;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use content::extract_page_spans;
pub use header::{is_pdf_bytes, pdf_version, pdf_version_from_path};

use std::io::Read;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Span, TextBlock};
use crate::render::PageSelection;

/// Options for extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Which pages to read
    pub pages: PageSelection,

    /// Apply Unicode NFC normalization to span text
    pub normalize: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages that fail).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            normalize: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip failing pages and continue
    Lenient,
}

/// PDF span and text extractor.
pub struct PdfExtractor {
    backend: LopdfBackend,
    options: ExtractOptions,
    version: String,
}

impl PdfExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        let version = pdf_version_from_path(path)?;
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self {
            backend,
            options,
            version,
        })
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let version = pdf_version(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self {
            backend,
            options,
            version,
        })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ExtractOptions::default())
    }

    /// Load a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// PDF version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Extract spans from the selected pages, in page order.
    pub fn extract_spans(&self) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for (page_num, page_id) in self.selected_pages()? {
            match extract_page_spans(&self.backend, page_num, page_id, self.options.normalize) {
                Ok(page_spans) => spans.extend(page_spans),
                Err(e) => self.page_failed(page_num, e)?,
            }
        }
        log::debug!("Extracted {} spans", spans.len());
        Ok(spans)
    }

    /// Extract one text block per selected page.
    pub fn extract_text_blocks(&self) -> Result<Vec<TextBlock>> {
        let mut blocks = Vec::new();
        for (page_num, _) in self.selected_pages()? {
            let text = match self.backend.page_text(page_num) {
                Ok(text) => text,
                Err(e) => {
                    self.page_failed(page_num, e)?;
                    String::new()
                }
            };
            let text = if self.options.normalize {
                text.nfc().collect()
            } else {
                text
            };
            blocks.push(TextBlock::new(page_num, text));
        }
        Ok(blocks)
    }

    fn selected_pages(&self) -> Result<Vec<(u32, PageId)>> {
        let pages = self.backend.pages();
        let count = pages.len() as u32;

        let first_missing = match &self.options.pages {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.start()).filter(|p| *p > count),
            PageSelection::Pages(list) => list.iter().copied().find(|p| *p > count),
        };
        if let Some(page) = first_missing {
            self.page_failed(page, Error::PageOutOfRange(page, count))?;
        }

        Ok(pages
            .into_iter()
            .filter(|(num, _)| self.options.pages.includes(*num))
            .collect())
    }

    /// Propagate in strict mode, log and continue in lenient mode.
    fn page_failed(&self, page_num: u32, err: Error) -> Result<()> {
        if self.options.error_mode == ErrorMode::Strict {
            return Err(err);
        }
        log::warn!("Failed to extract page {}: {}", page_num, err);
        Ok(())
    }
}
