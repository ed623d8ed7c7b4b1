//! Markdown to HTML conversion with math protection.

pub mod block;
pub mod emoji;
pub mod inline;
pub mod math;

#[cfg(test)]
mod test_integration;

pub use block::{Alignment, Block, Document, ListItem, ListKind, ParserState};
pub use inline::InlineFormatter;
pub use math::{MathKind, MathPlaceholder, MathShield};

/// Markdown processor
///
/// Math spans are shielded before block parsing and restored after all HTML
/// has been generated, so formulas are never escaped or formatted.
pub struct MarkdownProcessor {
    inline: InlineFormatter,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self {
            inline: InlineFormatter::new(),
        }
    }

    /// Convert a markdown body (frontmatter already removed) to HTML
    pub fn convert(&self, markdown: &str) -> String {
        let (shielded, shield) = MathShield::protect(markdown);
        let document = Document::parse(&shielded);
        let html = document.to_html(&self.inline);
        shield.restore(&html)
    }

    /// Parse into blocks without rendering.
    ///
    /// Math spans appear as placeholder tokens in the returned text.
    pub fn parse(&self, markdown: &str) -> (Document, MathShield) {
        let (shielded, shield) = MathShield::protect(markdown);
        (Document::parse(&shielded), shield)
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}
