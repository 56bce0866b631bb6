//! Markdown rendering

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Markdown renderer producing the HTML fragment stored on each post
pub struct MarkdownRenderer {
    options: Options,
    code_class_prefix: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // Front-matter is handled separately in FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;

        Self {
            options,
            code_class_prefix: "language-".to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        events.push(Event::Html(self.code_block_html(&code, lang.as_deref()).into()));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Plain text of the first paragraph, used when a post has no summary
    pub fn first_paragraph(&self, markdown: &str) -> Option<String> {
        let mut text = String::new();
        let mut in_paragraph = false;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::Paragraph) => in_paragraph = true,
                Event::End(TagEnd::Paragraph) if in_paragraph => break,
                Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
                _ => {}
            }
        }

        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Code blocks are emitted with a `language-*` class for client-side highlighting
    fn code_block_html(&self, code: &str, lang: Option<&str>) -> String {
        match lang {
            Some(lang) => format!(
                r#"<pre class="{prefix}{lang}"><code class="{prefix}{lang}">{}</code></pre>"#,
                html_escape(code),
                prefix = self.code_class_prefix,
            ),
            None => format!("<pre><code>{}</code></pre>", html_escape(code)),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
