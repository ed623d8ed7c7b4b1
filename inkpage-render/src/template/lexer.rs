//! Splits template source into text, `{{ … }}` output spans and `{% … %}`
//! directive tags.

/// A lexical piece of template source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    /// Inner text of `{{ … }}`, trimmed.
    Output(&'a str),
    /// Inner text of `{% … %}`, trimmed.
    Tag(&'a str),
}

/// Tokenize `source` in a single pass.
///
/// An opener without its closer is plain text. Output spans must have at
/// least one character inside and no `}`.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('{') {
        let open = pos + offset;
        let after = &source[open + 1..];

        let span = if after.starts_with('{') {
            output_span(&source[open + 2..]).map(|(inner, len)| (Token::Output(inner), len + 2))
        } else if after.starts_with('%') {
            tag_span(&source[open + 2..]).map(|(inner, len)| (Token::Tag(inner), len + 2))
        } else {
            None
        };

        match span {
            Some((token, len)) => {
                if open > text_start {
                    tokens.push(Token::Text(&source[text_start..open]));
                }
                tokens.push(token);
                pos = open + len;
                text_start = pos;
            }
            None => pos = open + 1,
        }
    }

    if text_start < source.len() {
        tokens.push(Token::Text(&source[text_start..]));
    }
    tokens
}

/// Inner text and consumed length (closer included) of an output span body.
fn output_span(rest: &str) -> Option<(&str, usize)> {
    let close = rest.find('}')?;
    if close == 0 || !rest[close..].starts_with("}}") {
        return None;
    }
    Some((rest[..close].trim(), close + 2))
}

fn tag_span(rest: &str) -> Option<(&str, usize)> {
    let close = rest.find("%}")?;
    Some((rest[..close].trim(), close + 2))
}
