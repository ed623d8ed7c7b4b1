//! Evaluates a node tree against a scope.

use super::ast::Node;
use super::path::{render_value, resolve, Scope};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Directive tags are stripped from substituted values; nothing else in a
/// value is touched.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{%.*?%\}").unwrap());

/// Render `nodes` into `out`.
///
/// Recursion depth follows the nesting depth of loops and conditionals in
/// the template source.
pub fn render_nodes(nodes: &[Node], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(var) => {
                let value = render_value(resolve(scope, &var.path));
                out.push_str(&TAG_RE.replace_all(&value, ""));
            }
            Node::For(lp) => {
                // Anything that is not a list iterates zero times.
                let items = resolve(scope, &lp.path)
                    .and_then(|v| v.as_list())
                    .unwrap_or_default();
                trace!(path = %lp.path, len = items.len(), "for loop");
                for item in items {
                    let child = scope.bind(&lp.var, item);
                    render_nodes(&lp.body, &child, out);
                }
            }
            Node::If(block) => {
                let branch = if block.condition.evaluate(scope) {
                    &block.then_branch
                } else {
                    &block.else_branch
                };
                render_nodes(branch, scope, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;
    use inkpage_types::{Context, Value};
    use serde_json::json;

    fn render(source: &str, ctx: &Context) -> String {
        let mut out = String::new();
        render_nodes(&parse(source), &Scope::root(ctx), &mut out);
        out
    }

    #[test]
    fn test_loop_binds_each_element() {
        let ctx = Context::new().with("tags", vec!["a", "b", "c"]);
        assert_eq!(render("{% for t in tags %}[{{ t }}]{% endfor %}", &ctx), "[a][b][c]");
    }

    #[test]
    fn test_non_list_iterates_zero_times() {
        let ctx = Context::new()
            .with("name", "abc")
            .with("map", Value::from(json!({"k": "v"})));
        assert_eq!(render("{% for c in name %}x{% endfor %}.", &ctx), ".");
        assert_eq!(render("{% for c in map %}x{% endfor %}.", &ctx), ".");
        assert_eq!(render("{% for c in missing %}x{% endfor %}.", &ctx), ".");
    }

    #[test]
    fn test_loop_variable_does_not_leak() {
        let ctx = Context::new().with("xs", vec!["1"]).with("x", "outer");
        assert_eq!(
            render("{% for x in xs %}{{ x }}{% endfor %}-{{ x }}", &ctx),
            "1-outer"
        );
    }

    #[test]
    fn test_nested_loops_see_outer_bindings() {
        let ctx = Context::new().with(
            "groups",
            Value::from(json!([
                {"name": "g1", "items": ["a", "b"]},
                {"name": "g2", "items": ["c"]}
            ])),
        );
        assert_eq!(
            render(
                "{% for g in groups %}{% for i in g.items %}{{ g.name }}:{{ i }} {% endfor %}{% endfor %}",
                &ctx
            ),
            "g1:a g1:b g2:c "
        );
    }

    #[test]
    fn test_if_else() {
        let ctx = Context::new().with("on", true).with("off", false);
        assert_eq!(render("{% if on %}yes{% else %}no{% endif %}", &ctx), "yes");
        assert_eq!(render("{% if off %}yes{% else %}no{% endif %}", &ctx), "no");
        assert_eq!(render("{% if off %}yes{% endif %}", &ctx), "");
    }

    #[test]
    fn test_directive_tags_removed_from_values() {
        let ctx = Context::new()
            .with("html", "<pre>{% for x in xs %}</pre>")
            .with("xs", vec!["a"]);
        assert_eq!(render("{{ html }}", &ctx), "<pre></pre>");

        let ctx = Context::new().with("code", "{%\nif a\n%}{{ a }}");
        assert_eq!(render("[{{ code }}]", &ctx), "[{{ a }}]");
    }
}
