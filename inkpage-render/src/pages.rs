//! Blog page rendering: assembles template contexts from the site config,
//! post records and any extra data, then renders them.

use crate::template::Template;
use inkpage_core::{posts_value, related_posts, Config, Post, DEFAULT_RELATED_LIMIT};
use inkpage_types::{Context, Value};

/// A rendered post page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub slug: String,
    pub html: String,
}

/// Renders the blog index and post pages for one site
pub struct SiteRenderer {
    config: Config,
    extra: Context,
    related_limit: usize,
}

impl SiteRenderer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            extra: Context::new(),
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    /// Make `value` available to every page under `key` (e.g. profile data
    /// fetched by the caller). Page bindings win over extra data.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    fn base_context(&self) -> Context {
        let mut ctx = self.extra.clone();
        ctx.insert("config", self.config.as_value());
        ctx
    }

    /// Context for the blog index: `config` and `posts`.
    pub fn blog_index_context(&self, posts: &[Post]) -> Context {
        let mut ctx = self.base_context();
        ctx.insert("posts", posts_value(posts));
        ctx
    }

    /// Context for one post page: `config`, `post` and `related_posts`.
    pub fn post_page_context(&self, post: &Post, related: &[&Post]) -> Context {
        let mut ctx = self.base_context();
        ctx.insert("post", post.to_value());
        ctx.insert(
            "related_posts",
            Value::List(related.iter().map(|p| p.to_value()).collect()),
        );
        ctx
    }

    pub fn render_blog_index(&self, template: &Template, posts: &[Post]) -> String {
        template.render(&self.blog_index_context(posts))
    }

    /// One page per post, each with its own related posts.
    pub fn render_post_pages(&self, template: &Template, posts: &[Post]) -> Vec<RenderedPage> {
        let pages: Vec<RenderedPage> = posts
            .iter()
            .map(|post| {
                let related = related_posts(post, posts, self.related_limit);
                RenderedPage {
                    slug: post.slug.clone(),
                    html: template.render(&self.post_page_context(post, &related)),
                }
            })
            .collect();

        tracing::info!("Rendered {} post pages", pages.len());
        pages
    }
}
