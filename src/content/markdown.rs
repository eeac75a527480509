//! Markdown rendering

use pulldown_cmark::{html, Options, Parser};

/// Renders markdown bodies to HTML
///
/// The artifact feeds a front end that styles plain tags, so rendering
/// sticks to core CommonMark with no extension options enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hi\n\nThere");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<p>There</p>"));
    }

    #[test]
    fn test_render_lists_and_links() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- one\n- [two](https://example.com)\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains(r#"<a href="https://example.com">two</a>"#));
    }

    #[test]
    fn test_render_fenced_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```js\nlet x = 1;\n```\n");
        assert!(html.contains("<pre><code class=\"language-js\">"));
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn test_extensions_stay_off() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~");
        assert!(!html.contains("<del>"));
        assert!(html.contains("~~gone~~"));
    }
}
