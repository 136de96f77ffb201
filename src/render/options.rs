//! Rendering options and page selection.

use std::ops::RangeInclusive;

/// Options for HTML rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title, rendered as a level-1 heading before the content
    pub title: Option<String>,

    /// CSS `@page` size (e.g., "A4", "letter")
    pub page_size: String,

    /// CSS `@page` margin shorthand
    pub page_margins: String,

    /// Paragraph font size in points
    pub body_font_size_pt: f32,

    /// Use the profile's most frequent font for the body
    pub use_profile_font: bool,

    /// Extra CSS appended to the generated stylesheet (inserted verbatim)
    pub extra_css: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: impl Into<String>) -> Self {
        self.page_size = size.into();
        self
    }

    /// Set the page margins.
    pub fn with_page_margins(mut self, margins: impl Into<String>) -> Self {
        self.page_margins = margins.into();
        self
    }

    /// Set the paragraph font size.
    pub fn with_body_font_size(mut self, pt: f32) -> Self {
        self.body_font_size_pt = pt;
        self
    }

    /// Enable or disable the profile font override.
    pub fn with_profile_font(mut self, enabled: bool) -> Self {
        self.use_profile_font = enabled;
        self
    }

    /// Append custom CSS.
    pub fn with_extra_css(mut self, css: impl Into<String>) -> Self {
        self.extra_css = Some(css.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            page_size: "A4".to_string(),
            page_margins: "24mm 18mm 24mm 18mm".to_string(),
            body_font_size_pt: 12.0,
            use_profile_font: true,
            extra_css: None,
        }
    }
}

/// Which pages of a source document to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed, ascending)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a selection like `"all"`, `"2-5"` or `"1,3,7-9"`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                return parse_range(start, end).map(PageSelection::Range);
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(parse_range(start, end)?),
                None => pages.push(parse_page(part)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Page numbers start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("Invalid page number: {}", s.trim())),
    }
}

fn parse_range(start: &str, end: &str) -> Result<RangeInclusive<u32>, String> {
    let (start, end) = (parse_page(start)?, parse_page(end)?);
    if start > end {
        return Err(format!("Invalid page range: {}-{}", start, end));
    }
    Ok(start..=end)
}
