//! Rendering module: content nodes to HTML, JSON or PDF.

mod css;
mod html;
mod json;
mod options;
pub mod pdf;

pub use css::{build_stylesheet, css_font_name};
pub use html::{render_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{PageSelection, RenderOptions};
pub use pdf::{RasterOptions, Rasterizer, WkhtmltopdfRasterizer};
