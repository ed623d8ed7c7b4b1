//! Site configuration.
//!
//! The configuration is an opaque JSON mapping handed to templates verbatim
//! under the `config` key. Nothing here validates its shape.

use inkpage_types::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Config must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Site configuration mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Value>,
}

impl Config {
    /// Parse configuration from JSON text.
    ///
    /// ```
    /// use inkpage_core::Config;
    ///
    /// let config = Config::from_json_str(r#"{"site": {"title": "Notes"}}"#).unwrap();
    /// assert_eq!(config.get("site").and_then(|s| s.get("title")).map(|t| t.to_string()),
    ///            Some("Notes".to_string()));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        match raw {
            serde_json::Value::Object(_) => match Value::from(raw) {
                Value::Map(values) => Ok(Self { values }),
                _ => Err(ConfigError::NotAnObject("a non-object")),
            },
            serde_json::Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
            serde_json::Value::String(_) => Err(ConfigError::NotAnObject("a string")),
            serde_json::Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
            serde_json::Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
            serde_json::Value::Null => Err(ConfigError::NotAnObject("null")),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The whole mapping as a template value.
    pub fn as_value(&self) -> Value {
        Value::Map(self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object() {
        let config = Config::from_json_str(r#"{"github": {"user": "me"}, "posts_per_page": 5}"#)
            .expect("valid config");
        assert_eq!(config.get("posts_per_page"), Some(&Value::from(5i64)));
        assert!(matches!(config.as_value(), Value::Map(_)));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Config::default().is_empty());
        assert_eq!(Config::default().as_value(), Value::Map(BTreeMap::new()));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Config::from_json_str("{not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = Config::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "Config must be a JSON object, found an array");
    }
}
