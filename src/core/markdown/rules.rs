//! Ordered substitution rules applied after code blocks are extracted.
//!
//! Each rule is a regex plus a replacement. Order matters: headers before
//! paragraphs, bold before italic, lists before the collapse pass.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::RenderOptions;
use super::code_blocks::contains_placeholder;
use super::escape::escape_html;

/// Opening or closing block-level tag. A paragraph candidate containing one is left unwrapped.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/)?(h|ul|ol|li|blockquote|pre|img)").expect("block tag regex is valid")
});

const LINK_TEMPLATE: &str =
    r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#;

/// How a rule rewrites a match.
#[derive(Clone, Copy)]
pub enum Replacement {
    /// `regex` replacement template (`${1}`, `${name}`).
    Template(&'static str),
    /// Computed from the captures.
    With(fn(&Captures<'_>) -> String),
}

/// One step of the rendering pipeline.
#[derive(Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("rule {} has an invalid pattern: {}", name, e));
        Self {
            name,
            pattern,
            replacement,
        }
    }

    fn template(name: &'static str, pattern: &str, template: &'static str) -> Self {
        Self::new(name, pattern, Replacement::Template(template))
    }

    fn with(name: &'static str, pattern: &str, f: fn(&Captures<'_>) -> String) -> Self {
        Self::new(name, pattern, Replacement::With(f))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn replace_once<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.replacement {
            Replacement::Template(template) => self.pattern.replace_all(text, template),
            Replacement::With(f) => self.pattern.replace_all(text, f),
        }
    }

    /// Apply the rule to `text`. Returns the input untouched when nothing matches.
    pub fn apply(&self, text: String) -> String {
        let replaced = match self.replace_once(&text) {
            Cow::Owned(s) => Some(s),
            Cow::Borrowed(_) => None,
        };
        match replaced {
            Some(next) => {
                log::trace!("rule {} rewrote {} bytes", self.name, text.len());
                next
            }
            None => text,
        }
    }
}

fn wrap_paragraph(caps: &Captures<'_>) -> String {
    let m = &caps[0];
    if BLOCK_TAG_RE.is_match(m) || contains_placeholder(m) {
        m.to_string()
    } else {
        format!("<p>{}</p>", m)
    }
}

/// Marker-less text of one list item line: `* x`, `- x` or `12. x`.
fn list_item_text(line: &str) -> &str {
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .or_else(|| line.split_once(". ").map(|(_, rest)| rest))
        .unwrap_or(line)
}

/// One single-item list per line of the run, back to back, for the collapse pass to merge.
fn list_run(caps: &Captures<'_>, tag: &str) -> String {
    let mut out = String::new();
    if let Some(close) = caps.name("close") {
        out.push_str(close.as_str());
    }
    for line in caps["items"].lines() {
        out.push_str(&format!(
            "<{tag}>\n<li>{}</li>\n</{tag}>",
            list_item_text(line)
        ));
    }
    out
}

fn unordered_run(caps: &Captures<'_>) -> String {
    list_run(caps, "ul")
}

fn ordered_run(caps: &Captures<'_>) -> String {
    list_run(caps, "ol")
}

fn escaped_link(caps: &Captures<'_>) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(&caps[2]),
        escape_html(&caps[1])
    )
}

/// Build the ordered rule table for `options`.
pub fn build_rules(options: &RenderOptions) -> Vec<Rule> {
    let link = if options.escape_links {
        Rule::with("link", r"\[([^\]]+)\]\(([^)]+)\)", escaped_link)
    } else {
        Rule::template("link", r"\[([^\]]+)\]\(([^)]+)\)", LINK_TEMPLATE)
    };

    vec![
        // Headers: longest marker first so `###` is never read as `#`.
        Rule::template("h3", r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
        Rule::template("h2", r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
        Rule::template("h1", r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
        // A run of items starts after a blank line, or right after a list generated by an earlier rule.
        Rule::with(
            "list-star",
            r"(?mR)(?:^\s*\n|(?P<close></ul>)\r?\n)(?P<items>\* .*(?:\r?\n\* .*)*)",
            unordered_run,
        ),
        Rule::with(
            "list-dash",
            r"(?mR)(?:^\s*\n|(?P<close></ul>)\r?\n)(?P<items>- .*(?:\r?\n- .*)*)",
            unordered_run,
        ),
        Rule::with(
            "list-ordered",
            r"(?mR)(?:^\s*\n|(?P<close></ol>)\r?\n)(?P<items>[0-9]+\. .*(?:\r?\n[0-9]+\. .*)*)",
            ordered_run,
        ),
        Rule::template("collapse-ul", r"</ul>\s*<ul>", ""),
        Rule::template("collapse-ol", r"</ol>\s*<ol>", ""),
        Rule::template("strong-star", r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        Rule::template("em-star", r"\*(.*?)\*", "<em>${1}</em>"),
        Rule::template("strong-underscore", r"__(.*?)__", "<strong>${1}</strong>"),
        Rule::template("em-underscore", r"_(.*?)_", "<em>${1}</em>"),
        link,
        Rule::with("paragraph", r"(?mR)^\s*(\n)?(.+)", wrap_paragraph),
        Rule::template("empty-paragraph", r"<p></p>", ""),
    ]
}
