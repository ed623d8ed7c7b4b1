//! `{% if %}` condition grammar.
//!
//! Forms, tried in order:
//! - `path == 'literal'` / `path != 'literal'` (single or double quotes)
//! - `a and b and …`
//! - bare `path`

use super::path::{render_value, resolve, Scope};
use once_cell::sync::Lazy;
use regex::Regex;

static EQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([\w.]+)\s*==\s*['"](.+?)['"]"#).unwrap());
static NE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([\w.]+)\s*!=\s*['"](.+?)['"]"#).unwrap());

const AND: &str = " and ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals { path: String, literal: String },
    NotEquals { path: String, literal: String },
    All(Vec<String>),
    Truthy(String),
}

impl Condition {
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();

        if let Some(caps) = EQ_RE.captures(expr) {
            return Condition::Equals {
                path: caps[1].to_string(),
                literal: caps[2].to_string(),
            };
        }
        if let Some(caps) = NE_RE.captures(expr) {
            return Condition::NotEquals {
                path: caps[1].to_string(),
                literal: caps[2].to_string(),
            };
        }
        if expr.contains(AND) {
            return Condition::All(expr.split(AND).map(|p| p.trim().to_string()).collect());
        }
        Condition::Truthy(expr.to_string())
    }

    /// Comparisons use the rendered string form, so a missing path compares
    /// as the empty string.
    pub fn evaluate(&self, scope: &Scope<'_>) -> bool {
        match self {
            Condition::Equals { path, literal } => render_value(resolve(scope, path)) == *literal,
            Condition::NotEquals { path, literal } => {
                render_value(resolve(scope, path)) != *literal
            }
            Condition::All(paths) => paths.iter().all(|p| truthy(scope, p)),
            Condition::Truthy(path) => truthy(scope, path),
        }
    }
}

fn truthy(scope: &Scope<'_>, path: &str) -> bool {
    resolve(scope, path).is_some_and(|v| v.is_truthy())
}
