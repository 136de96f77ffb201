//! Stylesheet generation.

use crate::model::StyleProfile;

use super::RenderOptions;

/// Build the `<style>` block for a rendered document.
pub fn build_stylesheet(profile: &StyleProfile, options: &RenderOptions) -> String {
    let mut rules: Vec<String> = vec![
        format!(
            "@page {{ size: {}; margin: {}; }}",
            options.page_size, options.page_margins
        ),
        "@media print { html, body { height: 100%; } }".into(),
        "body { font-family: system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial; color: #111; line-height:1.45; }".into(),
        "div.document { max-width: 800px; margin: 0 auto; }".into(),
        format!(
            "p {{ margin: 8px 0; font-size: {}pt; }}",
            options.body_font_size_pt
        ),
        "h1,h2,h3 { margin: 14px 0 8px; font-weight:700; }".into(),
        ".page-break { page-break-after: always; break-after: page; }".into(),
        "h1 { page-break-inside: avoid; }".into(),
        "table { page-break-inside: avoid; }".into(),
        "img { max-width: 100%; height: auto; }".into(),
        "table{border-collapse:collapse;width:100%;margin:10px 0} table th, table td{border:1px solid #ddd;padding:8px;text-align:left;}".into(),
        "ul, ol { margin: 6px 0 6px 24px; }".into(),
    ];

    if options.use_profile_font {
        if let Some(font) = profile.top_font().map(css_font_name).filter(|f| !f.is_empty()) {
            rules.push(format!("body {{ font-family: '{}', sans-serif; }}", font));
        }
    }

    if let Some(extra) = options.extra_css.as_deref().filter(|c| !c.trim().is_empty()) {
        rules.push(extra.to_string());
    }

    format!("<style>\n{}\n</style>", rules.join("\n"))
}

/// Make a PDF font name safe inside a quoted CSS string.
///
/// Embedded subsets carry a six-letter tag (`ABCDEF+Garamond`) that no
/// browser knows; it is dropped along with quotes, backslashes and angle
/// brackets.
pub fn css_font_name(font: &str) -> String {
    let font = match font.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) => rest,
        _ => font,
    };
    font.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\\' | '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}
