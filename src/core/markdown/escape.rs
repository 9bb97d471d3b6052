//! HTML escaping for code block content and (optionally) link fields.

use std::borrow::Cow;

/// Characters that must not reach the page unescaped, with their entities.
static ESCAPE_MAP: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#039;"),
];

fn entity(c: char) -> Option<&'static str> {
    ESCAPE_MAP
        .iter()
        .find(|(special, _)| *special == c)
        .map(|(_, entity)| *entity)
}

/// Replace `& < > " '` with their HTML entities in a single pass.
/// Borrows the input when there is nothing to escape.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c: char| entity(c).is_some()) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_script_tag() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"a & b < c > d " e ' f"#),
            "a &amp; b &lt; c &gt; d &quot; e &#039; f"
        );
    }

    #[test]
    fn plain_text_is_borrowed() {
        let out = escape_html("nothing special here");
        assert!(matches!(out, Cow::Borrowed("nothing special here")));
    }

    #[test]
    fn existing_entities_are_escaped_again() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(escape_html("héllo <wörld>"), "héllo &lt;wörld&gt;");
    }

    #[test]
    fn empty_string() {
        assert_eq!(escape_html(""), "");
    }
}
