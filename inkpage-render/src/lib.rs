//! # inkpage-render
//!
//! Template rendering library for inkpage.
//!
//! This crate implements the `{{ }}` / `{% %}` template language and uses it
//! to render the blog index and post pages.

pub mod pages;
pub mod template;

pub use pages::{RenderedPage, SiteRenderer};
pub use template::{render_template, Template};
