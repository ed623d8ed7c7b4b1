//! Template directive language.
//!
//! Supported syntax:
//! - `{{ path }}` and `{{ path | filter }}` (filters are parsed but ignored)
//! - `{% for x in path %}…{% endfor %}`
//! - `{% if cond %}…{% else %}…{% endif %}`
//!
//! Source is tokenized once and parsed into a [`Node`] tree, which is then
//! evaluated without re-scanning text. Values substituted into the output
//! are never interpreted as template syntax. Evaluation recurses once per
//! nesting level of loops and conditionals, so nesting depth is bounded
//! only by the call stack.

pub mod ast;
pub mod condition;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod path;

pub use ast::{ForLoop, IfBlock, Node, VarRef};
pub use condition::Condition;
pub use path::{render_value, resolve, Scope};

use inkpage_types::Context;

/// A parsed template, reusable across renders
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source. Malformed directives are dropped rather than
    /// reported.
    pub fn parse(source: &str) -> Self {
        Self {
            nodes: parser::parse(source),
        }
    }

    pub fn render(&self, ctx: &Context) -> String {
        let mut out = String::new();
        evaluator::render_nodes(&self.nodes, &Scope::root(ctx), &mut out);
        out
    }
}

/// Parse and render in one call.
///
/// ```
/// use inkpage_render::render_template;
/// use inkpage_types::Context;
///
/// let ctx = Context::new().with("tags", vec!["rust", "math"]);
/// assert_eq!(render_template("Tags: {{ tags }}", &ctx), "Tags: rust, math");
/// ```
pub fn render_template(source: &str, ctx: &Context) -> String {
    Template::parse(source).render(ctx)
}
