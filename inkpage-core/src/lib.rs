//! # inkpage-core
//!
//! Core library for the inkpage blog generator.
//!
//! This crate converts markdown posts (with embedded math) to HTML, parses
//! their frontmatter, and builds the post records that templates consume.

pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod related;

pub use config::{Config, ConfigError};
pub use frontmatter::parse_frontmatter;
pub use markdown::MarkdownProcessor;
pub use models::{posts_value, slug_from_path, sort_posts, Post, PostMeta};
pub use related::{related_posts, DEFAULT_RELATED_LIMIT};
