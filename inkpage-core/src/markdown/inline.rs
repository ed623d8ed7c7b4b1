//! Inline formatting for a single line of text.

use super::emoji::replace_shortcodes;
use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BOLD_STAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Applies emoji, image, link, bold, italic and code substitutions, in that
/// order. Each step only produces HTML the later steps do not match, so
/// formatting already-formatted text is a no-op.
pub struct InlineFormatter;

impl InlineFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, text: &str) -> String {
        let text = replace_shortcodes(text);
        let text = IMAGE_RE.replace_all(&text, r#"<img src="${2}" alt="${1}">"#);
        let text = LINK_RE.replace_all(&text, r#"<a href="${2}">${1}</a>"#);
        let text = BOLD_STAR_RE.replace_all(&text, "<strong>${1}</strong>");
        let text = BOLD_UNDERSCORE_RE.replace_all(&text, "<strong>${1}</strong>");
        let text = replace_italics(&text);
        CODE_RE.replace_all(&text, "<code>${1}</code>").into_owned()
    }
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-star emphasis.
///
/// An opening `*` directly after a backslash or an ASCII letter is not
/// emphasis (`a*b*c` stays as written), and a closing `*` followed by
/// another `*` does not close.
fn replace_italics(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        if i > 0 && (bytes[i - 1] == b'\\' || bytes[i - 1].is_ascii_alphabetic()) {
            i += 1;
            continue;
        }

        match text[i + 1..].find('*') {
            Some(len) if len > 0 => {
                let close = i + 1 + len;
                if bytes.get(close + 1) == Some(&b'*') {
                    i += 1;
                    continue;
                }
                out.push_str(&text[copied..i]);
                out.push_str("<em>");
                out.push_str(&text[i + 1..close]);
                out.push_str("</em>");
                copied = close + 1;
                i = close + 1;
            }
            _ => i += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}
