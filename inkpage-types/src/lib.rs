//! Shared types for inkpage
//!
//! This crate provides the dynamically-typed [`Value`] that flows through the
//! template engine, and the root [`Context`] a template is rendered against.
//! Site configuration, remote profile data and post records all end up here
//! before they reach a template.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use serde_json::Number;

/// A template value
///
/// There is no null variant: data converted from JSON maps `null` to the
/// empty string, which is also what an unresolvable path renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(Number),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The empty string, used wherever a lookup degrades to "nothing".
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// General truthiness
    ///
    /// Empty strings, lists and maps are false, as are `false` and zero.
    /// Everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

/// Natural string form
///
/// Booleans render as `True` / `False`, so existing templates comparing
/// against those literals keep working. Lists join their elements with
/// `", "`; maps render as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{}", n),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::empty(),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON number form and become zero.
    fn from(n: f64) -> Self {
        Value::Number(Number::from_f64(n).unwrap_or_else(|| Number::from(0u64)))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Context> for Value {
    fn from(ctx: Context) -> Self {
        Value::Map(ctx.vars)
    }
}

/// The root mapping a template is rendered against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any previous binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder form of [`Context::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Context {
    fn from(vars: BTreeMap<String, Value>) -> Self {
        Self { vars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(Value::from("hello").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from(true).is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(Value::from(3i64).is_truthy());
        assert!(!Value::from(0i64).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(Value::from(vec!["a"]).is_truthy());
        assert!(!Value::Map(BTreeMap::new()).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::from(false).to_string(), "False");
        assert_eq!(Value::from(vec!["rust", "web"]).to_string(), "rust, web");
        assert_eq!(Value::from(json!({"a": 1})).to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_from_json_maps_null_to_empty_string() {
        let value = Value::from(json!({"name": null, "tags": ["a", null]}));
        assert_eq!(value.get("name"), Some(&Value::empty()));
        assert_eq!(
            value.get("tags"),
            Some(&Value::List(vec![Value::from("a"), Value::empty()]))
        );
    }

    #[test]
    fn test_deserialize_from_json_text() {
        let value: Value = serde_json::from_str(r#"{"site": {"title": "Blog", "count": 2}}"#)
            .expect("valid json");
        let site = value.get("site").expect("site key");
        assert_eq!(site.get("title"), Some(&Value::from("Blog")));
        assert_eq!(site.get("count"), Some(&Value::from(2i64)));
    }

    #[test]
    fn test_context_builder() {
        let ctx = Context::new().with("title", "Hello").with("draft", false);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("title"), Some(&Value::from("Hello")));
        assert!(ctx.get("missing").is_none());
    }

    #[test]
    fn test_non_finite_float_becomes_zero() {
        assert_eq!(Value::from(f64::NAN), Value::from(0i64));
    }
}
