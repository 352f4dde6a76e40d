//! Compiler configuration
//!
//! Loaded from JSON or built in code. Every field is optional:
//!
//! ```json
//! {
//!   "patterns": { "zipcode": "[0-9]{6}" },
//!   "date_format": "%d/%m/%Y",
//!   "datetime_format": "%Y-%m-%d %H:%M:%S"
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::SchemaError;
#[cfg(feature = "temporal")]
use crate::validators::{DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT};

#[cfg(not(feature = "temporal"))]
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
#[cfg(not(feature = "temporal"))]
const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Settings applied when the built-in registry is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Extra regex-backed validators, name to pattern. Registered after the
    /// built-in patterns, so a name here replaces a built-in one.
    pub patterns: IndexMap<String, String>,
    /// Default format of `date`.
    pub date_format: String,
    /// Default format of `datetime`.
    pub datetime_format: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            patterns: IndexMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
        }
    }
}

impl CompilerConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text)
            .map_err(|e| SchemaError::config(format!("invalid compiler config: {e}")))
    }

    /// Adds a regex-backed validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.patterns.insert(name.into(), pattern.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(CompilerConfig::from_json("{}").unwrap(), CompilerConfig::default());
    }

    #[test]
    fn test_default_formats_match_validators() {
        let config = CompilerConfig::default();
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.datetime_format, DEFAULT_DATETIME_FORMAT);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = CompilerConfig::from_json(
            r#"{"patterns": {"zipcode": "[0-9]{6}"}, "date_format": "%d/%m/%Y"}"#,
        )
        .unwrap();
        assert_eq!(config.patterns.get("zipcode").map(String::as_str), Some("[0-9]{6}"));
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.datetime_format, CompilerConfig::default().datetime_format);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CompilerConfig::from_json(r#"{"patern": {}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Config { .. }));
    }

    #[test]
    fn test_builder_round_trips_through_json() {
        let config = CompilerConfig::default()
            .with_pattern("hex", "[0-9a-f]+")
            .with_date_format("%Y/%m/%d");
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(CompilerConfig::from_json(&text).unwrap(), config);
    }
}
