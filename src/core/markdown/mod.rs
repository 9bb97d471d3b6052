//! Markdown to HTML for chat messages: headers, emphasis, links, lists and fenced code.
//!
//! Rendering is a fixed sequence of text substitutions over the whole message:
//! code blocks first, then the [`rules`] table, then code blocks are put back.

mod code_blocks;
mod escape;
pub mod rules;

use std::sync::LazyLock;

pub use code_blocks::{extract_code_blocks, process_code_blocks, restore_code_blocks};
pub use escape::escape_html;
pub use rules::Rule;

/// Rendering switches. The default reproduces the chat UI output exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape link labels and URLs instead of inserting them verbatim.
    pub escape_links: bool,
}

/// A compiled rule table for one set of [`RenderOptions`].
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    rules: Vec<Rule>,
}

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::default);

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            rules: rules::build_rules(&options),
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Rules in the order they run.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Render `text` to HTML. `None` and `""` give `""`.
    pub fn render(&self, text: Option<&str>) -> String {
        match text {
            Some(text) if !text.is_empty() => self.render_str(text),
            _ => String::new(),
        }
    }

    /// Render a non-optional message.
    pub fn render_str(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        log::debug!("Rendering {} bytes of markdown", text.len());

        let (mut html, blocks) = extract_code_blocks(text);
        if !blocks.is_empty() {
            log::trace!("Extracted {} code block(s)", blocks.len());
        }
        for rule in &self.rules {
            html = rule.apply(html);
        }
        restore_code_blocks(&html, &blocks)
    }
}

/// Render with the default options.
pub fn render(text: Option<&str>) -> String {
    DEFAULT_RENDERER.render(text)
}

/// [`render`] for a plain `&str`.
pub fn render_str(text: &str) -> String {
    DEFAULT_RENDERER.render_str(text)
}
