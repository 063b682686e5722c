//! Markdown rendering.
//!
//! Converts markdown bodies to HTML via pulldown-cmark with three
//! post-processing concerns layered on top of the event stream:
//!
//! - **Syntax highlighting**: fenced code blocks are run through syntect
//!   and replaced with pre-highlighted HTML. Unknown languages and indented
//!   blocks fall back to an escaped plain `<pre>`.
//! - **Heading anchors**: every `h1`–`h6` gets a slugified `id` attribute,
//!   deduplicated within the document. Levels 1–3 are additionally recorded
//!   as [`Heading`] entries for the right-rail table of contents.
//! - **Plain text**: visible text is accumulated alongside the HTML and
//!   whitespace-collapsed. The search indexer consumes this instead of
//!   re-stripping tags from the rendered output.
//!
//! Enabled extensions: tables, footnotes, strikethrough, task lists.

use maud::html;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use thiserror::Error;

use crate::slug::AnchorSet;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("unknown highlight theme '{0}' (available: {1})")]
    UnknownTheme(String, String),
}

/// A heading recorded for the table of contents.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Heading {
    /// Heading level, 1–3. Deeper levels get anchors but no TOC entry.
    pub level: u8,
    /// Visible heading text with inline markup flattened.
    pub text: String,
    /// Anchor id, unique within the document.
    pub id: String,
}

/// Output of rendering one markdown body.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub headings: Vec<Heading>,
    /// Tag-free text for the search index, whitespace-collapsed.
    pub plain_text: String,
}

/// Markdown-to-HTML renderer with a loaded highlighting environment.
///
/// Syntax and theme sets are expensive to construct, so one renderer is
/// built per pipeline run and shared across pages (it is `Sync`, rayon
/// workers borrow it).
#[derive(Debug)]
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

/// TOC depth cutoff: h1–h3 appear in the right rail.
const TOC_MAX_LEVEL: u8 = 3;

impl MarkdownRenderer {
    /// Build a renderer using the named syntect theme.
    pub fn new(theme_name: &str) -> Result<Self, MarkdownError> {
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.get(theme_name).cloned().ok_or_else(|| {
            let available = theme_set
                .themes
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            MarkdownError::UnknownTheme(theme_name.to_string(), available)
        })?;
        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Render one markdown body to HTML, headings, and plain text.
    pub fn render(&self, markdown: &str) -> Rendered {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut headings: Vec<Heading> = Vec::new();
        let mut anchors = AnchorSet::new();
        let mut plain = String::new();

        // Buffer for the construct currently being captured. Headings are
        // buffered so the anchor id (derived from the inner text) can be
        // injected into the start tag; code blocks are buffered so the whole
        // block goes through the highlighter in one piece.
        let mut heading_buf: Option<(Tag, Vec<Event>, String)> = None;
        let mut code_buf: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            // Info strings may carry flags after the language
                            // ("rust,no_run") — the first word is the language.
                            let token = info.split([',', ' ']).next().unwrap_or("").to_string();
                            if token.is_empty() { None } else { Some(token) }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_buf = Some((lang, String::new()));
                }
                Event::Text(text) if code_buf.is_some() => {
                    if let Some((_, buf)) = code_buf.as_mut() {
                        buf.push_str(&text);
                    }
                    push_plain(&mut plain, &text);
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_buf.take() {
                        let html = self.highlight_block(lang.as_deref(), &code);
                        events.push(Event::Html(html.into()));
                    }
                }
                Event::Start(tag @ Tag::Heading { .. }) => {
                    heading_buf = Some((tag, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some((start, inner, text)) = heading_buf.take() {
                        let id = anchors.assign(&text);
                        let Tag::Heading { classes, attrs, .. } = start else {
                            unreachable!("heading buffer only opens on heading tags");
                        };
                        events.push(Event::Start(Tag::Heading {
                            level,
                            id: Some(id.clone().into()),
                            classes,
                            attrs,
                        }));
                        events.extend(inner);
                        events.push(Event::End(TagEnd::Heading(level)));

                        let level = level as u8;
                        if level <= TOC_MAX_LEVEL {
                            headings.push(Heading { level, text, id });
                        }
                    }
                }
                event if heading_buf.is_some() => {
                    if let Some((_, inner, text)) = heading_buf.as_mut() {
                        match &event {
                            Event::Text(t) | Event::Code(t) => {
                                text.push_str(t);
                                push_plain(&mut plain, t);
                            }
                            Event::SoftBreak | Event::HardBreak => text.push(' '),
                            _ => {}
                        }
                        inner.push(event);
                    }
                }
                Event::Text(text) => {
                    push_plain(&mut plain, &text);
                    events.push(Event::Text(text));
                }
                Event::Code(code) => {
                    push_plain(&mut plain, &code);
                    events.push(Event::Code(code));
                }
                Event::SoftBreak => {
                    plain.push(' ');
                    events.push(Event::SoftBreak);
                }
                Event::HardBreak => {
                    plain.push(' ');
                    events.push(Event::HardBreak);
                }
                other => events.push(other),
            }
        }

        let mut html = String::new();
        md_html::push_html(&mut html, events.into_iter());

        Rendered {
            html,
            headings,
            plain_text: collapse_whitespace(&plain),
        }
    }

    /// Highlight one code block, falling back to an escaped plain `<pre>`.
    fn highlight_block(&self, lang: Option<&str>, code: &str) -> String {
        let syntax = lang.and_then(|l| self.syntax_set.find_syntax_by_token(l));
        match syntax {
            Some(syntax) => {
                match syntect::html::highlighted_html_for_string(
                    code,
                    &self.syntax_set,
                    syntax,
                    &self.theme,
                ) {
                    Ok(highlighted) => format!(
                        "<div class=\"code-block\" data-lang=\"{}\">{}</div>",
                        lang.unwrap_or(""),
                        highlighted
                    ),
                    Err(err) => {
                        log::warn!("highlighting failed for a {:?} block: {err}", lang);
                        plain_block(code)
                    }
                }
            }
            None => plain_block(code),
        }
    }
}

/// Escaped, unhighlighted code block for unknown languages.
fn plain_block(code: &str) -> String {
    html! {
        div.code-block {
            pre { code { (code) } }
        }
    }
    .into_string()
}

fn push_plain(plain: &mut String, text: &str) {
    plain.push_str(text);
    plain.push(' ');
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
