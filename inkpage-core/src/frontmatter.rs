//! Frontmatter parsing from markdown files.
//!
//! The metadata block is a `---`-delimited list of `key: value` lines, not
//! full YAML. Parsing never fails: anything malformed falls back to default
//! metadata with the whole input as body.

use crate::models::PostMeta;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const DELIMITER: &str = "---";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w\x{4e00}-\x{9fff}-]+").unwrap());

/// Parse frontmatter from markdown content
///
/// Returns a tuple of (metadata, markdown_body).
///
/// # Example
///
/// ```
/// use inkpage_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ntags: [rust, 笔记]\n---\n# Hello World\n";
///
/// let (meta, body) = parse_frontmatter(content);
/// assert_eq!(meta.title, "My Post");
/// assert_eq!(meta.tags, vec!["rust", "笔记"]);
/// assert_eq!(body, "# Hello World");
/// ```
pub fn parse_frontmatter(content: &str) -> (PostMeta, String) {
    let mut meta = PostMeta::default();

    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return (meta, content.to_string());
    };
    let Some(end) = rest.find(DELIMITER) else {
        debug!("frontmatter has no closing delimiter, using defaults");
        return (meta, content.to_string());
    };

    for line in rest[..end].trim().lines() {
        if let Some((key, value)) = line.split_once(':') {
            meta.set(key.trim(), value.trim());
        }
    }

    let body = rest[end + DELIMITER.len()..].trim().to_string();
    (meta, body)
}

/// Split a `tags:` value into word-like tokens, keeping first occurrences.
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for m in TAG_RE.find_iter(value) {
        if !tags.iter().any(|t| t == m.as_str()) {
            tags.push(m.as_str().to_string());
        }
    }
    tags
}
