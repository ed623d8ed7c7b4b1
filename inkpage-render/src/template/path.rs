//! Dotted-path lookup against the template scope.
//!
//! Resolution never fails loudly: a missing key, an out-of-range index or a
//! step into a scalar all yield `None`, which renders as the empty string.

use inkpage_types::{Context, Value};

/// Variable scope: the root context plus loop bindings layered on top.
///
/// Binding a loop variable borrows the parent scope; nothing is copied or
/// mutated.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Root(&'a Context),
    Bound {
        parent: &'a Scope<'a>,
        name: &'a str,
        value: &'a Value,
    },
}

impl<'a> Scope<'a> {
    pub fn root(ctx: &'a Context) -> Self {
        Scope::Root(ctx)
    }

    /// A child scope with `name` bound to `value`.
    pub fn bind<'b>(&'b self, name: &'b str, value: &'b Value) -> Scope<'b> {
        Scope::Bound {
            parent: self,
            name,
            value,
        }
    }

    /// Look up a top-level name, innermost binding first.
    pub fn lookup(&self, key: &str) -> Option<&'a Value> {
        match *self {
            Scope::Root(ctx) => ctx.get(key),
            Scope::Bound {
                parent,
                name,
                value,
            } => {
                if name == key {
                    Some(value)
                } else {
                    parent.lookup(key)
                }
            }
        }
    }
}

/// Resolve a dotted path such as `post.tags.0`.
///
/// Maps are indexed by key, lists by non-negative integer segments.
pub fn resolve<'a>(scope: &Scope<'a>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = scope.lookup(first)?;

    for segment in segments {
        current = match current {
            Value::Map(map) => map.get(segment)?,
            Value::List(items) if is_index(segment) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// String form of a resolved value; `None` becomes the empty string.
pub fn render_value(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Context {
        let value = Value::from(json!({
            "site": {"title": "Notes", "links": ["a", "b"]},
            "posts": [{"title": "first"}, {"title": "second"}],
            "count": 2,
        }));
        match value {
            Value::Map(map) => Context::from(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_nested_maps_and_lists() {
        let ctx = context();
        let scope = Scope::root(&ctx);
        assert_eq!(resolve(&scope, "site.title"), Some(&Value::from("Notes")));
        assert_eq!(resolve(&scope, "site.links.1"), Some(&Value::from("b")));
        assert_eq!(resolve(&scope, "posts.0.title"), Some(&Value::from("first")));
    }

    #[test]
    fn test_missing_paths_are_none() {
        let ctx = context();
        let scope = Scope::root(&ctx);
        assert_eq!(resolve(&scope, "nope"), None);
        assert_eq!(resolve(&scope, "site.nope"), None);
        assert_eq!(resolve(&scope, "site.links.5"), None);
        assert_eq!(resolve(&scope, "site.links.-1"), None);
        assert_eq!(resolve(&scope, "site.links.first"), None);
        assert_eq!(resolve(&scope, "count.value"), None);
        assert_eq!(resolve(&scope, ""), None);
        assert_eq!(render_value(resolve(&scope, "site.nope.deeper")), "");
    }

    #[test]
    fn test_bindings_shadow_parent() {
        let ctx = context();
        let root = Scope::root(&ctx);
        let item = Value::from("bound");
        let child = root.bind("count", &item);
        assert_eq!(resolve(&child, "count"), Some(&item));
        assert_eq!(resolve(&child, "site.title"), Some(&Value::from("Notes")));
        assert_eq!(resolve(&root, "count"), Some(&Value::from(2i64)));
    }

    #[test]
    fn test_render_value_joins_lists() {
        let ctx = context();
        let scope = Scope::root(&ctx);
        assert_eq!(render_value(resolve(&scope, "site.links")), "a, b");
        assert_eq!(render_value(resolve(&scope, "count")), "2");
    }
}
