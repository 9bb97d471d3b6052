//! Fenced code blocks: ```lang ... ``` to `<pre><code class="language-lang">`.
//!
//! Blocks are pulled out of the text before any other rule runs and swapped for
//! placeholder tokens, so emphasis, links and paragraph wrapping never see code.
//! A `U+E000` already present in the input is escaped to `U+E000 e U+E001` first,
//! so input text can never pose as a token.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::escape::escape_html;

/// Opening and closing marks of a placeholder token. Private-use code points.
pub(crate) const PLACEHOLDER_OPEN: char = '\u{E000}';
pub(crate) const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// Stand-in for a literal `U+E000` from the input while tokens are live.
const ESCAPED_OPEN: &str = "\u{E000}e\u{E001}";

/// Opening fence, optional language tag up to the end of the line, then a lazy
/// body running to the nearest closing fence.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?R)```(.*?)\r?\n((?s:.*?))```").expect("fence regex is valid")
});

/// A block token, or an escaped literal `U+E000`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{E000}(?:([0-9]+)|e)\u{E001}").expect("placeholder regex is valid")
});

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}[0-9]+\u{E001}").expect("token regex is valid"));

fn escape_placeholder_marks(text: &str) -> Cow<'_, str> {
    if text.contains(PLACEHOLDER_OPEN) {
        Cow::Owned(text.replace(PLACEHOLDER_OPEN, ESCAPED_OPEN))
    } else {
        Cow::Borrowed(text)
    }
}

fn unescape_placeholder_marks(text: &str) -> String {
    text.replace(ESCAPED_OPEN, "\u{E000}")
}

/// Render one fenced block.
fn code_block_html(lang: &str, code: &str) -> String {
    format!(
        "<pre><code class=\"language-{}\">{}</code></pre>",
        lang,
        escape_html(code)
    )
}

/// Replace every terminated fenced block with a placeholder token.
/// Returns the rewritten text and the rendered blocks, indexed by token number.
/// Unterminated fences are left alone.
pub fn extract_code_blocks(text: &str) -> (String, Vec<String>) {
    let text = escape_placeholder_marks(text);
    let mut blocks = Vec::new();
    let replaced = FENCE_RE.replace_all(&text, |caps: &Captures| {
        let idx = blocks.len();
        blocks.push(unescape_placeholder_marks(&code_block_html(
            &caps[1], &caps[2],
        )));
        format!("{PLACEHOLDER_OPEN}{idx}{PLACEHOLDER_CLOSE}")
    });
    (replaced.into_owned(), blocks)
}

/// Put rendered blocks back in place of their tokens and turn escaped input
/// marks back into `U+E000`. Tokens with no matching block are kept verbatim.
pub fn restore_code_blocks(text: &str, blocks: &[String]) -> String {
    if !text.contains(PLACEHOLDER_OPEN) {
        return text.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| match caps.get(1) {
            Some(idx) => idx
                .as_str()
                .parse::<usize>()
                .ok()
                .and_then(|idx| blocks.get(idx))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string()),
            None => PLACEHOLDER_OPEN.to_string(),
        })
        .into_owned()
}

/// Whether `text` holds a code block placeholder.
pub(crate) fn contains_placeholder(text: &str) -> bool {
    TOKEN_RE.is_match(text)
}

/// Convert fenced code blocks in place, without running any other rule.
pub fn process_code_blocks(text: &str) -> String {
    let (extracted, blocks) = extract_code_blocks(text);
    restore_code_blocks(&extracted, &blocks)
}
