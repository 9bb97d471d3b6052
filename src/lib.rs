//! # chatmark
//!
//! Markdown to HTML for chat messages. Handles the subset chat replies use:
//! headers, bold/italic, links, bullet and numbered lists, and fenced code
//! blocks (escaped and tagged with their language).
//!
//! ```
//! let html = chatmark::render(Some("**hi** [docs](https://example.com)"));
//! assert!(html.starts_with("<p><strong>hi</strong>"));
//! ```
//!
//! Link labels and URLs are inserted verbatim unless
//! [`RenderOptions::escape_links`] is set; escape them yourself if the input is untrusted.

pub mod core;

pub use crate::core::markdown::{
    RenderOptions, Renderer, escape_html, process_code_blocks, render, render_str,
};
