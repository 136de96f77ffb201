//! HTML rendering for content nodes.

use html_escape::encode_quoted_attribute;

use crate::model::{ContentNode, InlineRun, NodeKind, StyleProfile};

use super::css::build_stylesheet;
use super::RenderOptions;

const PAGE_BREAK: &str = "<div class='page-break'></div>";

/// Render content nodes as a complete HTML document.
///
/// All node text is escaped except [`NodeKind::RawMarkup`], which is inserted
/// verbatim. A non-empty `title` becomes a level-1 heading before the
/// content, whether or not the content already starts with one.
///
/// # Example
///
/// ```
/// use papermorph::{render_html, ContentNode, StyleProfile};
///
/// let html = render_html(&[ContentNode::heading(1, "Hi")], &StyleProfile::empty(), None);
/// assert_eq!(html.matches("<h1>").count(), 1);
/// assert!(html.contains("<h1>Hi</h1>"));
/// ```
pub fn render_html(nodes: &[ContentNode], profile: &StyleProfile, title: Option<&str>) -> String {
    HtmlRenderer::default().render_titled(nodes, profile, title)
}

/// HTML renderer.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render with the title from the options.
    pub fn render(&self, nodes: &[ContentNode], profile: &StyleProfile) -> String {
        self.render_titled(nodes, profile, self.options.title.as_deref())
    }

    fn render_titled(
        &self,
        nodes: &[ContentNode],
        profile: &StyleProfile,
        title: Option<&str>,
    ) -> String {
        let mut parts = Vec::with_capacity(nodes.len() + 1);

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            parts.push(format!("<h1>{}</h1>", escape(title)));
        }

        for node in nodes {
            parts.push(render_node(node));
            if node.page_break_after {
                parts.push(PAGE_BREAK.to_string());
            }
        }

        let mut html = String::from("<!doctype html><html><head><meta charset='utf-8'/>");
        html.push_str(&build_stylesheet(profile, &self.options));
        html.push_str("</head><body><div class='document'>");
        html.push_str(&parts.join("\n"));
        html.push_str("</div></body></html>");
        html
    }
}

fn render_node(node: &ContentNode) -> String {
    match &node.kind {
        NodeKind::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            format!("<h{0}>{1}</h{0}>", level, escape(text))
        }
        NodeKind::Paragraph { runs: Some(runs), .. } if !runs.is_empty() => render_runs(runs),
        NodeKind::Paragraph { text, .. } => {
            format!("<p>{}</p>", escape(text.as_deref().unwrap_or_default()))
        }
        NodeKind::List { ordered, items } => render_list(*ordered, items),
        NodeKind::Table { rows, header } => render_table(rows, *header),
        NodeKind::RawMarkup { content } => content.clone(),
    }
}

fn render_runs(runs: &[InlineRun]) -> String {
    let mut out = String::from("<p>");
    for run in runs {
        let text = escape(&run.text);
        match (run.bold, run.italic) {
            (true, true) => {
                out.push_str("<strong><em>");
                out.push_str(&text);
                out.push_str("</em></strong>");
            }
            (true, false) => {
                out.push_str("<strong>");
                out.push_str(&text);
                out.push_str("</strong>");
            }
            (false, true) => {
                out.push_str("<em>");
                out.push_str(&text);
                out.push_str("</em>");
            }
            (false, false) => out.push_str(&text),
        }
    }
    out.push_str("</p>");
    out
}

fn render_list(ordered: bool, items: &[String]) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let mut out = format!("<{}>", tag);
    for item in items {
        out.push_str("<li>");
        out.push_str(&escape(item));
        out.push_str("</li>");
    }
    out.push_str(&format!("</{}>", tag));
    out
}

fn render_table(rows: &[Vec<String>], header: bool) -> String {
    let mut out = String::from("<table>");
    for (i, row) in rows.iter().enumerate() {
        let cell = if header && i == 0 { "th" } else { "td" };
        out.push_str("<tr>");
        for text in row {
            out.push_str(&format!("<{0}>{1}</{0}>", cell, escape(text)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

/// Escape `&`, `<`, `>`, `"` and `'`.
fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    encode_quoted_attribute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(html: &str) -> &str {
        let start = html.find("<div class='document'>").unwrap() + "<div class='document'>".len();
        let end = html.rfind("</div></body></html>").unwrap();
        &html[start..end]
    }

    #[test]
    fn test_document_frame() {
        let html = render_html(&[], &StyleProfile::empty(), None);
        assert!(html.starts_with("<!doctype html><html><head><meta charset='utf-8'/><style>\n"));
        assert!(html.ends_with("</style></head><body><div class='document'></div></body></html>"));
    }

    #[test]
    fn test_paragraph_escaped() {
        let html = render_html(
            &[ContentNode::paragraph("<script>alert('x') & \"y\"</script>")],
            &StyleProfile::empty(),
            None,
        );
        assert_eq!(
            body(&html),
            "<p>&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;</p>"
        );
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_title_injected_before_content() {
        let nodes = [ContentNode::heading(1, "Existing")];
        let html = render_html(&nodes, &StyleProfile::empty(), Some("A & B"));
        assert_eq!(body(&html), "<h1>A &amp; B</h1>\n<h1>Existing</h1>");

        let html = render_html(&nodes, &StyleProfile::empty(), Some(""));
        assert_eq!(body(&html), "<h1>Existing</h1>");
    }

    #[test]
    fn test_heading_level_clamped() {
        let nodes = [ContentNode::heading(0, "zero"), ContentNode::heading(9, "nine")];
        let html = render_html(&nodes, &StyleProfile::empty(), None);
        assert_eq!(body(&html), "<h1>zero</h1>\n<h6>nine</h6>");
    }

    #[test]
    fn test_runs() {
        let nodes = [ContentNode::paragraph_runs(vec![
            InlineRun::styled("both", true, true),
            InlineRun::styled(" bold", true, false),
            InlineRun::styled(" it", false, true),
            InlineRun::plain(" <plain>"),
        ])];
        let html = render_html(&nodes, &StyleProfile::empty(), None);
        assert_eq!(
            body(&html),
            "<p><strong><em>both</em></strong><strong> bold</strong><em> it</em> &lt;plain&gt;</p>"
        );
    }

    #[test]
    fn test_empty_runs_fall_back_to_text() {
        let node = ContentNode {
            kind: NodeKind::Paragraph {
                text: Some("fallback".into()),
                runs: Some(Vec::new()),
            },
            page_break_after: false,
        };
        let html = render_html(&[node], &StyleProfile::empty(), None);
        assert_eq!(body(&html), "<p>fallback</p>");
    }

    #[test]
    fn test_lists_tables_raw_and_breaks() {
        let nodes = [
            ContentNode::list(false, vec!["a".into(), "<b>".into()]),
            ContentNode::list(true, vec!["one".into()]).with_page_break(),
            ContentNode::table(vec![vec!["H".into()], vec!["v".into()]], true),
            ContentNode::table(vec![vec!["x".into()]], false),
            ContentNode::raw("<hr/>"),
        ];
        let html = render_html(&nodes, &StyleProfile::empty(), None);
        assert_eq!(
            body(&html),
            [
                "<ul><li>a</li><li>&lt;b&gt;</li></ul>",
                "<ol><li>one</li></ol>",
                "<div class='page-break'></div>",
                "<table><tr><th>H</th></tr><tr><td>v</td></tr></table>",
                "<table><tr><td>x</td></tr></table>",
                "<hr/>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_renderer_uses_option_title() {
        let renderer = HtmlRenderer::new(RenderOptions::new().with_title("Doc"));
        let html = renderer.render(&[], &StyleProfile::empty());
        assert_eq!(body(&html), "<h1>Doc</h1>");
    }
}
