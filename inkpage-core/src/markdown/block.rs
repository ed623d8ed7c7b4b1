//! Line-oriented block parser.
//!
//! Parsing is a fold of [`step`] over the input lines. At most one
//! multi-line construct (code fence, list or table) is open at a time and it
//! is closed before anything else is emitted.

use super::inline::InlineFormatter;
use super::math::is_block_placeholder;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static RULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*_]{3,}$").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+").unwrap());
static TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+\[([ xX])\]\s+(.+)$").unwrap());
static ORDERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static ALIGN_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-+:?$").unwrap());

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    /// `Some` for todo items (`- [ ]` / `- [x]`).
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_cell(cell: &str) -> Self {
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A block-level construct. Text is kept as written; inline formatting and
/// escaping happen when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Blockquote {
        text: String,
    },
    HorizontalRule,
    CodeBlock {
        language: String,
        lines: Vec<String>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        alignments: Vec<Alignment>,
    },
    RawHtml {
        text: String,
    },
}

/// Rows collected for a table that is still open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBuffer {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub alignments: Vec<Alignment>,
}

impl TableBuffer {
    /// A table that never saw a data row emits nothing.
    fn finish(self) -> Option<Block> {
        let header = self.header?;
        Some(Block::Table {
            header,
            rows: self.rows,
            alignments: self.alignments,
        })
    }
}

/// The construct currently open between lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Idle,
    Code {
        language: String,
        lines: Vec<String>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
    Table(TableBuffer),
}

impl ParserState {
    /// Close whatever is open.
    pub fn close(self) -> Option<Block> {
        match self {
            ParserState::Idle => None,
            ParserState::Code { language, lines } => {
                debug!(language = %language, "unterminated code fence flushed");
                Some(Block::CodeBlock { language, lines })
            }
            ParserState::List { kind, items } => Some(Block::List { kind, items }),
            ParserState::Table(table) => table.finish(),
        }
    }
}

/// Advance the parser by one line.
///
/// Returns the new state and the blocks completed by this line, in order.
pub fn step(state: ParserState, line: &str) -> (ParserState, Vec<Block>) {
    let mut emitted = Vec::new();

    if let ParserState::Code {
        language,
        mut lines,
    } = state
    {
        if line.starts_with(FENCE) {
            emitted.push(Block::CodeBlock { language, lines });
            return (ParserState::Idle, emitted);
        }
        lines.push(line.to_string());
        return (ParserState::Code { language, lines }, emitted);
    }

    if let Some(info) = line.strip_prefix(FENCE) {
        emitted.extend(state.close());
        let language = match info.trim() {
            "" => "plaintext".to_string(),
            lang => lang.to_string(),
        };
        let lines = Vec::new();
        return (ParserState::Code { language, lines }, emitted);
    }

    let trimmed = line.trim();

    if is_table_row(trimmed) {
        let cells = split_cells(trimmed);
        let mut table = match state {
            ParserState::Table(table) => table,
            other => {
                emitted.extend(other.close());
                TableBuffer::default()
            }
        };
        if is_alignment_row(&cells) {
            table.alignments = cells.iter().map(|c| Alignment::from_cell(c)).collect();
        } else if table.header.is_none() {
            table.header = Some(cells);
        } else {
            table.rows.push(cells);
        }
        return (ParserState::Table(table), emitted);
    }

    let state = match state {
        ParserState::Table(table) => {
            emitted.extend(table.finish());
            ParserState::Idle
        }
        other => other,
    };

    if trimmed.is_empty() {
        emitted.extend(state.close());
        return (ParserState::Idle, emitted);
    }

    if let Some(block) = single_line_block(line, trimmed) {
        emitted.extend(state.close());
        emitted.push(block);
        return (ParserState::Idle, emitted);
    }

    if BULLET_RE.is_match(line) {
        let item = match TODO_RE.captures(line) {
            Some(caps) => ListItem {
                text: caps[2].to_string(),
                checked: Some(caps[1].eq_ignore_ascii_case("x")),
            },
            None => ListItem {
                text: BULLET_RE.replace(line, "").into_owned(),
                checked: None,
            },
        };
        return push_item(state, ListKind::Unordered, item, emitted);
    }

    if ORDERED_RE.is_match(line) {
        let item = ListItem {
            text: ORDERED_RE.replace(line, "").into_owned(),
            checked: None,
        };
        return push_item(state, ListKind::Ordered, item, emitted);
    }

    emitted.extend(state.close());
    let text = line.to_string();
    if is_raw_html(trimmed) || is_block_placeholder(trimmed) {
        emitted.push(Block::RawHtml { text });
    } else {
        emitted.push(Block::Paragraph { text });
    }
    (ParserState::Idle, emitted)
}

/// Headings, blockquotes and horizontal rules.
fn single_line_block(line: &str, trimmed: &str) -> Option<Block> {
    if line.starts_with('#') {
        if let Some(caps) = HEADING_RE.captures(line) {
            return Some(Block::Heading {
                level: caps[1].len() as u8,
                text: caps[2].to_string(),
            });
        }
    }

    if let Some(rest) = line.strip_prefix('>') {
        return Some(Block::Blockquote {
            text: rest.trim().to_string(),
        });
    }

    if RULE_RE.is_match(trimmed) {
        return Some(Block::HorizontalRule);
    }

    None
}

fn push_item(
    state: ParserState,
    kind: ListKind,
    item: ListItem,
    mut emitted: Vec<Block>,
) -> (ParserState, Vec<Block>) {
    let mut items = match state {
        ParserState::List {
            kind: open_kind,
            items,
        } if open_kind == kind => items,
        other => {
            emitted.extend(other.close());
            Vec::new()
        }
    };
    items.push(item);
    (ParserState::List { kind, items }, emitted)
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn split_cells(trimmed: &str) -> Vec<String> {
    let inner = if trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        ""
    };
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Every non-empty cell is a run of dashes with optional colons.
fn is_alignment_row(cells: &[String]) -> bool {
    cells
        .iter()
        .filter(|c| !c.is_empty())
        .all(|c| ALIGN_CELL_RE.is_match(c))
}

fn is_raw_html(trimmed: &str) -> bool {
    trimmed.starts_with('<') || trimmed.to_lowercase().contains("<br")
}

/// Parsed markdown body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let mut state = ParserState::Idle;
        let mut blocks = Vec::new();

        for line in text.split('\n') {
            let (next, emitted) = step(state, line);
            blocks.extend(emitted);
            state = next;
        }
        blocks.extend(state.close());

        Self { blocks }
    }

    /// Render every block, one fragment per line.
    pub fn to_html(&self, inline: &InlineFormatter) -> String {
        self.blocks
            .iter()
            .map(|block| block.to_html(inline))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Block {
    pub fn to_html(&self, inline: &InlineFormatter) -> String {
        match self {
            Block::Heading { level, text } => {
                format!("<h{level}>{}</h{level}>", inline.format(text))
            }
            Block::Paragraph { text } => format!("<p>{}</p>", inline.format(text)),
            Block::Blockquote { text } => {
                format!("<blockquote>{}</blockquote>", inline.format(text))
            }
            Block::HorizontalRule => "<hr>".to_string(),
            Block::CodeBlock { language, lines } => {
                let code = lines
                    .iter()
                    .map(|l| escape_angle_brackets(l))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "<div class=\"code-block\"><pre><code class=\"language-{}\">{}</code></pre></div>",
                    language, code
                )
            }
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Ordered => "ol",
                    ListKind::Unordered => "ul",
                };
                let mut html = format!("<{}>", tag);
                for item in items {
                    html.push_str(&render_item(item, inline));
                }
                html.push_str(&format!("</{}>", tag));
                html
            }
            Block::Table {
                header,
                rows,
                alignments,
            } => render_table(header, rows, alignments, inline),
            Block::RawHtml { text } => text.clone(),
        }
    }
}

fn render_item(item: &ListItem, inline: &InlineFormatter) -> String {
    let text = inline.format(&item.text);
    match item.checked {
        None => format!("<li>{}</li>", text),
        Some(checked) => format!(
            "<li style=\"list-style: none;\"><input type=\"checkbox\" {} disabled style=\"margin-right: 0.5em;\">{}</li>",
            if checked { "checked" } else { "" },
            text
        ),
    }
}

fn render_table(
    header: &[String],
    rows: &[Vec<String>],
    alignments: &[Alignment],
    inline: &InlineFormatter,
) -> String {
    let cell = |tag: &str, col: usize, text: &str| {
        let style = alignments
            .get(col)
            .map(|a| format!(" style=\"text-align:{}\"", a.as_str()))
            .unwrap_or_default();
        format!("<{tag}{style}>{}</{tag}>", inline.format(text))
    };

    let mut html = String::from("<div class=\"table-wrapper\"><table><thead><tr>");
    for (col, text) in header.iter().enumerate() {
        html.push_str(&cell("th", col, text));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for (col, text) in row.iter().enumerate() {
            html.push_str(&cell("td", col, text));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}
