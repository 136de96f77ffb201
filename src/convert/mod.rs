//! End-to-end style transfer: profile a sample PDF, restructure an input PDF
//! and render it in the sample's style.
//!
//! # Example
//!
//! ```no_run
//! use papermorph::convert::{ApplyOptions, OutputFormat, StyleTransfer, TitleSource};
//!
//! fn main() -> papermorph::Result<()> {
//!     let options = ApplyOptions::new()
//!         .with_output(OutputFormat::Html)
//!         .with_title(TitleSource::FirstHeading);
//!     let result = StyleTransfer::new(options).apply("sample.pdf", "input.pdf")?;
//!     println!("{} nodes, {} bytes", result.nodes.len(), result.content_len());
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, PdfExtractor};
use crate::model::{ContentNode, Span, StyleProfile, TextBlock};
use crate::profile::build_style_profile;
use crate::render::{
    to_json, HtmlRenderer, JsonFormat, RasterOptions, Rasterizer, RenderOptions,
};
use crate::structure::{
    group_spans_by_line, StructureOptions, StructureSource, StructureStats, Structurer,
};

/// Output format of a style transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled HTML document
    #[default]
    Html,
    /// PDF rasterized from the styled HTML
    Pdf,
    /// Profile, nodes and statistics as JSON
    Json,
}

impl OutputFormat {
    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Json => "application/json",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "pdf" => Ok(OutputFormat::Pdf),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Other(format!("Unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where the rendered document's title comes from.
///
/// The library default injects nothing, so content that opens with a heading
/// does not show it twice. The `papermorph apply` command line defaults to
/// [`TitleSource::FirstHeading`] and takes `--no-title` to opt out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TitleSource {
    /// No injected title (the render options' title still applies)
    #[default]
    None,
    /// Repeat the first heading of the content as the title
    FirstHeading,
    /// A fixed title
    Fixed(String),
}

impl TitleSource {
    fn resolve(&self, nodes: &[ContentNode]) -> Option<String> {
        match self {
            TitleSource::None => None,
            TitleSource::FirstHeading => nodes
                .iter()
                .find_map(|n| n.heading_text())
                .map(str::to_string),
            TitleSource::Fixed(title) => Some(title.clone()),
        }
    }
}

/// Options for a style transfer.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Extraction options for both documents
    pub extract: ExtractOptions,

    /// Structuring options for the input document
    pub structure: StructureOptions,

    /// HTML rendering options
    pub render: RenderOptions,

    /// Rasterization options (PDF output only)
    pub raster: RasterOptions,

    /// Output format
    pub output: OutputFormat,

    /// Title source
    pub title: TitleSource,

    /// Read the sample and the input concurrently
    pub parallel: bool,
}

impl ApplyOptions {
    /// Create new apply options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set structuring options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set rasterization options.
    pub fn with_raster_options(mut self, options: RasterOptions) -> Self {
        self.raster = options;
        self
    }

    /// Set output format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set title source.
    pub fn with_title(mut self, title: TitleSource) -> Self {
        self.title = title;
        self
    }

    /// Enable or disable concurrent reading.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Read the documents one after the other.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default().lenient(),
            structure: StructureOptions::default(),
            render: RenderOptions::default(),
            raster: RasterOptions::default(),
            output: OutputFormat::Html,
            title: TitleSource::None,
            parallel: true,
        }
    }
}

/// Result of a style transfer.
#[derive(Debug, Clone)]
pub struct ApplyResult {
    /// Output document bytes (UTF-8 for HTML and JSON)
    pub content: Vec<u8>,

    /// MIME type of `content`
    pub mime_type: &'static str,

    /// Profile built from the sample
    pub profile: StyleProfile,

    /// Content nodes built from the input
    pub nodes: Vec<ContentNode>,

    /// Structuring statistics
    pub stats: StructureStats,

    /// Which input the nodes came from
    pub source: StructureSource,
}

impl ApplyResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Content as text, for HTML and JSON output.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    profile: &'a StyleProfile,
    source: StructureSource,
    stats: &'a StructureStats,
    nodes: &'a [ContentNode],
}

/// Style transfer pipeline.
pub struct StyleTransfer {
    options: ApplyOptions,
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl StyleTransfer {
    /// Create a pipeline with the given options.
    pub fn new(options: ApplyOptions) -> Self {
        Self {
            options,
            rasterizer: None,
        }
    }

    /// Use a specific rasterizer for PDF output instead of the one the raster
    /// options describe.
    pub fn with_rasterizer(mut self, rasterizer: Box<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    /// Options of this pipeline.
    pub fn options(&self) -> &ApplyOptions {
        &self.options
    }

    /// Restyle the PDF at `input` after the PDF at `sample`.
    pub fn apply<P: AsRef<Path>, Q: AsRef<Path>>(&self, sample: P, input: Q) -> Result<ApplyResult> {
        let (sample, input) = (sample.as_ref(), input.as_ref());
        self.run(
            |options| PdfExtractor::open_with_options(sample, options),
            |options| PdfExtractor::open_with_options(input, options),
        )
    }

    /// Restyle in-memory PDFs.
    pub fn apply_bytes(&self, sample: &[u8], input: &[u8]) -> Result<ApplyResult> {
        self.run(
            |options| PdfExtractor::from_bytes_with_options(sample, options),
            |options| PdfExtractor::from_bytes_with_options(input, options),
        )
    }

    /// Restyle already-extracted input against an existing profile.
    pub fn apply_extracted(
        &self,
        profile: StyleProfile,
        spans: &[Span],
        blocks: &[TextBlock],
    ) -> Result<ApplyResult> {
        let structurer = Structurer::new(self.options.structure.clone());
        let structure = structurer.structure(&group_spans_by_line(spans), blocks, &profile);
        log::debug!(
            "Structured {} nodes from {:?} ({} source lines)",
            structure.nodes.len(),
            structure.source,
            structure.stats.source_lines
        );

        let content = match self.options.output {
            OutputFormat::Json => {
                let output = JsonOutput {
                    profile: &profile,
                    source: structure.source,
                    stats: &structure.stats,
                    nodes: &structure.nodes,
                };
                to_json(&output, JsonFormat::Pretty)?.into_bytes()
            }
            OutputFormat::Html => self.render_html(&structure.nodes, &profile).into_bytes(),
            OutputFormat::Pdf => {
                let html = self.render_html(&structure.nodes, &profile);
                self.rasterize(&html)?
            }
        };

        Ok(ApplyResult {
            content,
            mime_type: self.options.output.mime_type(),
            profile,
            nodes: structure.nodes,
            stats: structure.stats,
            source: structure.source,
        })
    }

    fn run<S, I>(&self, open_sample: S, open_input: I) -> Result<ApplyResult>
    where
        S: Fn(ExtractOptions) -> Result<PdfExtractor> + Sync,
        I: Fn(ExtractOptions) -> Result<PdfExtractor> + Sync,
    {
        let extract = &self.options.extract;

        let profile_sample = || -> Result<StyleProfile> {
            let spans = open_sample(extract.clone())?.extract_spans()?;
            Ok(build_style_profile(&spans))
        };
        let read_input = || -> Result<(Vec<Span>, Vec<TextBlock>)> {
            let extractor = open_input(extract.clone())?;
            Ok((extractor.extract_spans()?, extractor.extract_text_blocks()?))
        };

        let (profile, input) = if self.options.parallel {
            rayon::join(profile_sample, read_input)
        } else {
            (profile_sample(), read_input())
        };
        let profile = profile?;
        let (spans, blocks) = input?;

        if profile.is_empty() {
            log::warn!("Sample document has no usable spans; all input text will be paragraphs");
        }
        self.apply_extracted(profile, &spans, &blocks)
    }

    fn render_html(&self, nodes: &[ContentNode], profile: &StyleProfile) -> String {
        let mut render = self.options.render.clone();
        if let Some(title) = self.options.title.resolve(nodes) {
            render.title = Some(title);
        }
        HtmlRenderer::new(render).render(nodes, profile)
    }

    fn rasterize(&self, html: &str) -> Result<Vec<u8>> {
        let fallback;
        let rasterizer: &dyn Rasterizer = match &self.rasterizer {
            Some(r) => r.as_ref(),
            None => {
                fallback = self.options.raster.rasterizer();
                fallback.as_ref()
            }
        };
        rasterizer.rasterize(html).inspect_err(|e| {
            log::warn!("{} failed: {}", rasterizer.name(), e);
        })
    }
}

/// Build a style profile from the PDF at `path`.
///
/// Pages that fail to extract are skipped.
pub fn extract_style<P: AsRef<Path>>(path: P) -> Result<StyleProfile> {
    extract_style_with_options(path, ExtractOptions::default().lenient())
}

/// Build a style profile from the PDF at `path` with custom options.
pub fn extract_style_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<StyleProfile> {
    let spans = PdfExtractor::open_with_options(path, options)?.extract_spans()?;
    Ok(build_style_profile(&spans))
}
