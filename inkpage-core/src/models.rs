//! Content model structs for posts.

use crate::frontmatter::{parse_frontmatter, parse_tags};
use crate::markdown::MarkdownProcessor;
use inkpage_types::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_LANG: &str = "en";

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub lang: String,

    /// Keys other than the ones above, verbatim.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for PostMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            lang: DEFAULT_LANG.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl PostMeta {
    /// Apply one `key: value` line.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "title" => self.title = value.to_string(),
            "date" => self.date = value.to_string(),
            "tags" => self.tags = parse_tags(value),
            "summary" => self.summary = value.to_string(),
            "lang" => self.lang = value.to_string(),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }
}

/// A single rendered post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (source file name without extension)
    pub slug: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub lang: String,
    /// Rendered HTML body
    pub html: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Post {
    /// Build a post from its markdown source (frontmatter included).
    pub fn from_markdown(
        slug: impl Into<String>,
        source: &str,
        processor: &MarkdownProcessor,
    ) -> Self {
        let (meta, body) = parse_frontmatter(source);
        let html = processor.convert(&body);
        Self::from_meta(slug, meta, html)
    }

    pub fn from_meta(slug: impl Into<String>, meta: PostMeta, html: String) -> Self {
        Self {
            slug: slug.into(),
            title: meta.title,
            date: meta.date,
            tags: meta.tags,
            summary: meta.summary,
            lang: meta.lang,
            html,
            extra: meta.extra,
        }
    }

    /// Template value for this post.
    pub fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert("slug".to_string(), Value::from(self.slug.as_str()));
        map.insert("title".to_string(), Value::from(self.title.as_str()));
        map.insert("date".to_string(), Value::from(self.date.as_str()));
        map.insert("tags".to_string(), Value::from(self.tags.clone()));
        map.insert("summary".to_string(), Value::from(self.summary.as_str()));
        map.insert("lang".to_string(), Value::from(self.lang.as_str()));
        map.insert("html".to_string(), Value::from(self.html.as_str()));
        let extra = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect::<BTreeMap<_, _>>();
        map.insert("extra".to_string(), Value::Map(extra));
        Value::Map(map)
    }
}

/// Slug for a post source file: its file name without extension.
pub fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Order posts newest first.
///
/// Dates compare as text, so `YYYY-MM-DD` dates sort chronologically and
/// undated posts go last. Equal dates keep their input order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Template value for a list of posts.
pub fn posts_value(posts: &[Post]) -> Value {
    Value::List(posts.iter().map(Post::to_value).collect())
}
