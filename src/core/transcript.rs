//! Chat transcripts: JSON message lists rendered to one HTML block per message.
//!
//! Accepts either a bare array of `{ "role", "content" }` objects or an object
//! with a `messages` array (the shape the chat backend stores sessions in).
//! Unknown fields such as `timestamp` are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::markdown::{Renderer, escape_html};

/// Role of the prompt message, hidden from transcripts by default.
pub const SYSTEM_ROLE: &str = "system";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Error loading a transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid transcript JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Session { messages: Vec<Message> },
    Messages(Vec<Message>),
}

/// Parse transcript JSON.
pub fn parse(json: &str) -> Result<Vec<Message>, TranscriptError> {
    let file: TranscriptFile = serde_json::from_str(json)?;
    Ok(match file {
        TranscriptFile::Session { messages } | TranscriptFile::Messages(messages) => messages,
    })
}

/// Read and parse a transcript file.
pub fn load(path: &Path) -> Result<Vec<Message>, TranscriptError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Render each message as `<div class="message {role}">`, skipping system
/// messages unless `include_system` is set.
pub fn render_transcript(messages: &[Message], renderer: &Renderer, include_system: bool) -> String {
    let blocks: Vec<String> = messages
        .iter()
        .filter(|m| include_system || m.role != SYSTEM_ROLE)
        .map(|m| {
            format!(
                "<div class=\"message {}\">\n{}\n</div>",
                escape_html(&m.role),
                renderer.render_str(&m.content)
            )
        })
        .collect();
    log::debug!(
        "Rendered {} of {} transcript message(s)",
        blocks.len(),
        messages.len()
    );
    blocks.join("\n")
}
