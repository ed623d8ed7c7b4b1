//! Recursive-descent parser from tokens to [`Node`]s.
//!
//! Malformed input never fails to parse:
//! - a `for`/`if` with no matching end tag disappears and its body is kept
//!   in place, as if the tag had never been written
//! - stray `endfor`, `endif`, `else` and unknown tags are dropped
//! - an end tag that belongs to an enclosing block closes every unmatched
//!   block nested inside it

use super::ast::{ForLoop, IfBlock, Node, VarRef};
use super::condition::Condition;
use super::lexer::{tokenize, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^for\s+(\w+)\s+in\s+([\w.]+)$").unwrap());
static IF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^if\s+(.+)$").unwrap());

/// Directive tag classification
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    For { var: String, path: String },
    If(Condition),
    Else,
    EndFor,
    EndIf,
    Unknown,
}

impl Directive {
    fn classify(tag: &str) -> Self {
        match tag {
            "else" => return Directive::Else,
            "endfor" => return Directive::EndFor,
            "endif" => return Directive::EndIf,
            _ => {}
        }
        if let Some(caps) = FOR_RE.captures(tag) {
            return Directive::For {
                var: caps[1].to_string(),
                path: caps[2].to_string(),
            };
        }
        if let Some(caps) = IF_RE.captures(tag) {
            return Directive::If(Condition::parse(&caps[1]));
        }
        Directive::Unknown
    }
}

/// A block whose body is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    For,
    If { seen_else: bool },
}

/// Why a body stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Eof,
    Else,
    EndFor,
    EndIf,
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    open: Vec<Frame>,
}

/// Parse template source into a node tree.
pub fn parse(source: &str) -> Vec<Node> {
    let mut parser = Parser {
        tokens: tokenize(source),
        pos: 0,
        open: Vec::new(),
    };
    let (nodes, _) = parser.parse_body();
    nodes
}

impl<'a> Parser<'a> {
    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    /// Parse nodes until end of input or a terminator some open block is
    /// waiting for.
    fn parse_body(&mut self) -> (Vec<Node>, End) {
        let mut nodes = Vec::new();

        while let Some(token) = self.next_token() {
            let directive = match token {
                Token::Text(text) => {
                    push_text(&mut nodes, text);
                    continue;
                }
                Token::Output(expr) => {
                    nodes.push(Node::Var(VarRef::parse(expr)));
                    continue;
                }
                Token::Tag(tag) => Directive::classify(tag),
            };

            let end = match directive {
                Directive::For { var, path } => self.parse_for(var, path, &mut nodes),
                Directive::If(condition) => self.parse_if(condition, &mut nodes),
                Directive::Else => Some(End::Else),
                Directive::EndFor => Some(End::EndFor),
                Directive::EndIf => Some(End::EndIf),
                Directive::Unknown => {
                    debug!(tag = ?token, "dropping unknown template tag");
                    None
                }
            };

            if let Some(end) = end {
                if end == End::Eof || self.is_awaited(end) {
                    return (nodes, end);
                }
                debug!(?end, "dropping stray template tag");
            }
        }

        (nodes, End::Eof)
    }

    /// Whether an open block accepts `end`. `else` only belongs to the
    /// innermost block, and only once.
    fn is_awaited(&self, end: End) -> bool {
        match end {
            End::Eof => true,
            End::Else => matches!(self.open.last(), Some(Frame::If { seen_else: false })),
            End::EndFor => self.open.contains(&Frame::For),
            End::EndIf => self
                .open
                .iter()
                .any(|frame| matches!(frame, Frame::If { .. })),
        }
    }

    /// Parse a loop body. Returns an end this level still has to handle
    /// when the loop turned out to be unmatched.
    fn parse_for(&mut self, var: String, path: String, nodes: &mut Vec<Node>) -> Option<End> {
        self.open.push(Frame::For);
        let (body, end) = self.parse_body();
        self.open.pop();

        if end == End::EndFor {
            nodes.push(Node::For(ForLoop { var, path, body }));
            return None;
        }

        debug!(%var, %path, "unmatched for loop, keeping its body");
        splice(nodes, body);
        Some(end)
    }

    fn parse_if(&mut self, condition: Condition, nodes: &mut Vec<Node>) -> Option<End> {
        self.open.push(Frame::If { seen_else: false });
        let (then_branch, mut end) = self.parse_body();

        let mut else_branch = Vec::new();
        if end == End::Else {
            if let Some(frame) = self.open.last_mut() {
                *frame = Frame::If { seen_else: true };
            }
            let (branch, branch_end) = self.parse_body();
            else_branch = branch;
            end = branch_end;
        }
        self.open.pop();

        if end == End::EndIf {
            nodes.push(Node::If(IfBlock {
                condition,
                then_branch,
                else_branch,
            }));
            return None;
        }

        debug!(?condition, "unmatched if block, keeping both branches");
        splice(nodes, then_branch);
        splice(nodes, else_branch);
        Some(end)
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Append `body` to `nodes`, merging adjacent text.
fn splice(nodes: &mut Vec<Node>, body: Vec<Node>) {
    for node in body {
        match node {
            Node::Text(text) => push_text(nodes, &text),
            other => nodes.push(other),
        }
    }
}
