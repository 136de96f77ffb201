//! # papermorph
//!
//! Learn the typography of one PDF and re-render another PDF's content in
//! that style.
//!
//! The pipeline has four stages:
//!
//! 1. **Profile**: reduce a sample document's spans to a [`StyleProfile`]
//!    (font usage, size percentiles, heading thresholds, list conventions).
//! 2. **Classify**: give each input span a [`Role`] with
//!    [`infer_role_for_span`].
//! 3. **Structure**: fold roles into [`ContentNode`]s (headings, paragraphs,
//!    lists), falling back to plain page text when spans are unusable.
//! 4. **Render**: emit a self-contained HTML document styled after the
//!    profile, optionally rasterized to PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use papermorph::apply_style;
//!
//! fn main() -> papermorph::Result<()> {
//!     let html = apply_style("sample.pdf", "input.pdf")?;
//!     std::fs::write("restyled.html", html)?;
//!     Ok(())
//! }
//! ```
//!
//! The core stages work on plain data and never fail:
//!
//! ```
//! use papermorph::{build_content_structure_from_spans, build_style_profile, render_html, Span};
//!
//! let sample = vec![
//!     Span::new("Report", 24.0),
//!     Span::new("Body text.", 12.0),
//!     Span::new("More body text.", 12.0),
//! ];
//! let profile = build_style_profile(&sample);
//!
//! let input = vec![Span::new("Intro", 24.0), Span::new("- first point", 12.0)];
//! let nodes = build_content_structure_from_spans(&input, &profile);
//! let html = render_html(&nodes, &profile, None);
//! assert!(html.contains("<h1>Intro</h1>"));
//! assert!(html.contains("<ul><li>first point</li></ul>"));
//! ```

pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod profile;
pub mod render;
pub mod role;
pub mod structure;

// Re-export commonly used types
pub use convert::{
    extract_style, extract_style_with_options, ApplyOptions, ApplyResult, OutputFormat,
    StyleTransfer, TitleSource,
};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, PdfExtractor};
pub use model::{
    ContentNode, FontUsage, HeadingRule, InlineRun, ListStyleInfo, NodeKind, Role, SampleText,
    SizePercentiles, Span, StyleProfile, TextBlock,
};
pub use profile::build_style_profile;
pub use render::{
    render_html, to_json, HtmlRenderer, JsonFormat, PageSelection, RasterOptions, Rasterizer,
    RenderOptions, WkhtmltopdfRasterizer,
};
pub use role::infer_role_for_span;
pub use structure::{
    build_content_structure_from_spans, build_content_structure_from_text_blocks,
    group_spans_by_line, Structure, StructureOptions, StructureSource, StructureStats, Structurer,
};

use std::path::Path;

/// Extract spans from every page of a PDF file.
///
/// Pages that fail to extract are skipped.
///
/// # Example
///
/// ```no_run
/// let spans = papermorph::extract_spans("document.pdf")?;
/// println!("{} spans", spans.len());
/// # Ok::<(), papermorph::Error>(())
/// ```
pub fn extract_spans<P: AsRef<Path>>(path: P) -> Result<Vec<Span>> {
    PdfExtractor::open_with_options(path, ExtractOptions::new().lenient())?.extract_spans()
}

/// Restyle the PDF at `input` after the PDF at `sample` and return HTML.
///
/// # Example
///
/// ```no_run
/// let html = papermorph::apply_style("sample.pdf", "input.pdf")?;
/// # Ok::<(), papermorph::Error>(())
/// ```
pub fn apply_style<P: AsRef<Path>, Q: AsRef<Path>>(sample: P, input: Q) -> Result<String> {
    let result = StyleTransfer::new(ApplyOptions::default()).apply(sample, input)?;
    into_text(result)
}

/// Restyle in-memory PDFs and return HTML.
pub fn apply_style_bytes(sample: &[u8], input: &[u8]) -> Result<String> {
    let result = StyleTransfer::new(ApplyOptions::default()).apply_bytes(sample, input)?;
    into_text(result)
}

/// Restyle the PDF at `input` after the PDF at `sample` and return PDF bytes.
///
/// Requires an HTML-to-PDF renderer (see [`RasterOptions`]).
///
/// # Example
///
/// ```no_run
/// use papermorph::{apply_style_to_pdf, RasterOptions};
///
/// let pdf = apply_style_to_pdf("sample.pdf", "input.pdf", RasterOptions::default())?;
/// std::fs::write("restyled.pdf", pdf)?;
/// # Ok::<(), papermorph::Error>(())
/// ```
pub fn apply_style_to_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    sample: P,
    input: Q,
    raster: RasterOptions,
) -> Result<Vec<u8>> {
    let options = ApplyOptions::new()
        .with_output(OutputFormat::Pdf)
        .with_raster_options(raster);
    Ok(StyleTransfer::new(options).apply(sample, input)?.content)
}

fn into_text(result: ApplyResult) -> Result<String> {
    String::from_utf8(result.content).map_err(|e| Error::Render(e.to_string()))
}
