//! Template AST types.

use super::condition::Condition;

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text to be output as-is.
    Text(String),

    /// Variable interpolation: `{{ post.title }}`
    Var(VarRef),

    /// For loop: `{% for tag in post.tags %}…{% endfor %}`
    For(ForLoop),

    /// Conditional: `{% if cond %}…{% else %}…{% endif %}`
    If(IfBlock),
}

/// Variable reference with optional, unapplied filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    /// Dotted path, e.g. `post.tags.0`.
    pub path: String,
    /// Filter names after `|`. Accepted syntactically, never applied.
    pub filters: Vec<String>,
}

impl VarRef {
    pub fn parse(expr: &str) -> Self {
        let mut parts = expr.split('|');
        let path = parts.next().unwrap_or_default().trim().to_string();
        let filters = parts
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        Self { path, filters }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Name bound to each element.
    pub var: String,
    /// Path to the list being iterated.
    pub path: String,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    pub condition: Condition,
    pub then_branch: Vec<Node>,
    pub else_branch: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_ref_filters() {
        let var = VarRef::parse("post.date | date('%Y') | upper");
        assert_eq!(var.path, "post.date");
        assert_eq!(var.filters, vec!["date('%Y')", "upper"]);

        let plain = VarRef::parse("title");
        assert_eq!(plain.path, "title");
        assert!(plain.filters.is_empty());
    }
}
