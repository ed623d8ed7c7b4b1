//! Math shielding: swap `$$…$$` and `$…$` spans for opaque tokens before
//! markdown parsing and put them back afterwards.
//!
//! Tokens are plain ASCII letters and digits, so neither the block parser,
//! the inline formatter nor code escaping can alter them.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

static BLOCK_MATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap());

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"MATH(BLOCK|INLINE)(\d+)END(BLOCK|INLINE)").unwrap());

/// Kind of protected math span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathKind {
    Block,
    Inline,
}

impl MathKind {
    fn tag(&self) -> &'static str {
        match self {
            MathKind::Block => "BLOCK",
            MathKind::Inline => "INLINE",
        }
    }
}

/// A single protected span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathPlaceholder {
    pub kind: MathKind,
    /// Position among placeholders of the same kind, counting from zero.
    pub index: usize,
    /// The formula without its delimiters.
    pub raw: String,
}

impl MathPlaceholder {
    /// The token standing in for this span.
    pub fn token(&self) -> String {
        placeholder_token(self.kind, self.index)
    }

    fn restored(&self) -> String {
        match self.kind {
            MathKind::Block => format!("<div class=\"math-block\">$${}$$</div>", self.raw),
            MathKind::Inline => format!("${}$", self.raw),
        }
    }
}

fn placeholder_token(kind: MathKind, index: usize) -> String {
    format!("MATH{}{}END{}", kind.tag(), index, kind.tag())
}

/// Check whether `text` is exactly one block-math token.
pub fn is_block_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE
        .captures(text)
        .is_some_and(|caps| caps.get(0).is_some_and(|m| m.as_str() == text) && &caps[1] == "BLOCK")
}

/// Protected spans collected by [`MathShield::protect`]
#[derive(Debug, Clone, Default)]
pub struct MathShield {
    blocks: Vec<MathPlaceholder>,
    inlines: Vec<MathPlaceholder>,
}

impl MathShield {
    /// Replace every math span in `text` with a placeholder token.
    ///
    /// Block math is taken first (shortest `$$…$$` span, may cross lines),
    /// then inline math on what remains.
    pub fn protect(text: &str) -> (String, MathShield) {
        let mut shield = MathShield::default();

        let text = BLOCK_MATH_RE.replace_all(text, |caps: &Captures| {
            let placeholder = MathPlaceholder {
                kind: MathKind::Block,
                index: shield.blocks.len(),
                raw: caps[1].to_string(),
            };
            let token = placeholder.token();
            shield.blocks.push(placeholder);
            token
        });

        let text = shield.protect_inline(&text);

        trace!(
            blocks = shield.blocks.len(),
            inlines = shield.inlines.len(),
            "protected math spans"
        );

        (text, shield)
    }

    /// Inline spans: `$` not touching another `$` on either side, at least one
    /// character of content, closed on the same line.
    fn protect_inline(&mut self, text: &str) -> String {
        let bytes = text.as_bytes();
        let is_dollar = |i: usize| bytes.get(i) == Some(&b'$');
        let lone_dollar = |i: usize| is_dollar(i) && !is_dollar(i + 1) && !(i > 0 && is_dollar(i - 1));

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            if !lone_dollar(i) {
                i += 1;
                continue;
            }

            let mut close = None;
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != b'\n' {
                if j > i + 1 && lone_dollar(j) {
                    close = Some(j);
                    break;
                }
                j += 1;
            }

            match close {
                Some(j) => {
                    let placeholder = MathPlaceholder {
                        kind: MathKind::Inline,
                        index: self.inlines.len(),
                        raw: text[i + 1..j].to_string(),
                    };
                    out.push_str(&text[copied..i]);
                    out.push_str(&placeholder.token());
                    self.inlines.push(placeholder);
                    copied = j + 1;
                    i = j + 1;
                }
                None => i += 1,
            }
        }

        out.push_str(&text[copied..]);
        out
    }

    /// Put every protected span back into `html`.
    ///
    /// Each token is replaced exactly once and restored content is never
    /// scanned again.
    pub fn restore(&self, html: &str) -> String {
        if self.is_empty() {
            return html.to_string();
        }

        PLACEHOLDER_RE
            .replace_all(html, |caps: &Captures| {
                let list = match &caps[1] {
                    "BLOCK" => &self.blocks,
                    _ => &self.inlines,
                };
                let found = caps[2]
                    .parse::<usize>()
                    .ok()
                    .filter(|_| caps[1] == caps[3])
                    .and_then(|idx| list.get(idx));
                match found {
                    Some(placeholder) => placeholder.restored(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn blocks(&self) -> &[MathPlaceholder] {
        &self.blocks
    }

    pub fn inlines(&self) -> &[MathPlaceholder] {
        &self.inlines
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.inlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_math_is_replaced() {
        let (text, shield) = MathShield::protect("before\n$$\na_1 * b_2\n$$\nafter");
        assert_eq!(text, "before\nMATHBLOCK0ENDBLOCK\nafter");
        assert_eq!(shield.blocks().len(), 1);
        assert_eq!(shield.blocks()[0].raw, "\na_1 * b_2\n");
    }

    #[test]
    fn test_block_math_takes_shortest_span() {
        let (text, shield) = MathShield::protect("$$a$$ and $$b$$");
        assert_eq!(text, "MATHBLOCK0ENDBLOCK and MATHBLOCK1ENDBLOCK");
        assert_eq!(shield.blocks()[1].raw, "b");
    }

    #[test]
    fn test_inline_math_is_replaced() {
        let (text, shield) = MathShield::protect("Euler: $e^{i\\pi} + 1 = 0$, done");
        assert_eq!(text, "Euler: MATHINLINE0ENDINLINE, done");
        assert_eq!(shield.inlines()[0].raw, "e^{i\\pi} + 1 = 0");
    }

    #[test]
    fn test_inline_math_does_not_cross_lines() {
        let (text, shield) = MathShield::protect("costs $5\nand $6");
        assert_eq!(text, "costs $5\nand $6");
        assert!(shield.is_empty());
    }

    #[test]
    fn test_inline_math_needs_content() {
        let (text, shield) = MathShield::protect("a $ $ b");
        assert_eq!(text, "a MATHINLINE0ENDINLINE b");
        assert_eq!(shield.inlines()[0].raw, " ");

        let (text, shield) = MathShield::protect("x$y");
        assert_eq!(text, "x$y");
        assert!(shield.is_empty());
    }

    #[test]
    fn test_restore_round_trips_raw_content() {
        let source = "Inline $a*b*c$ and\n$$\\sum_{i=0}^n |x_i|$$";
        let (text, shield) = MathShield::protect(source);
        let restored = shield.restore(&text);
        assert_eq!(
            restored,
            "Inline $a*b*c$ and\n<div class=\"math-block\">$$\\sum_{i=0}^n |x_i|$$</div>"
        );
    }

    #[test]
    fn test_restore_handles_many_placeholders() {
        let source: String = (0..12).map(|i| format!("${}$ ", i)).collect();
        let (text, shield) = MathShield::protect(&source);
        assert_eq!(shield.inlines().len(), 12);
        assert_eq!(shield.restore(&text), source);
    }

    #[test]
    fn test_is_block_placeholder() {
        assert!(is_block_placeholder("MATHBLOCK3ENDBLOCK"));
        assert!(!is_block_placeholder("MATHINLINE3ENDINLINE"));
        assert!(!is_block_placeholder("see MATHBLOCK3ENDBLOCK"));
    }
}
