//! Regex-driven validators
//!
//! Every text-format validator (`email`, `ipv4`, `url`, ...) is the same
//! thing: a name plus a pattern the whole input must match. One generic
//! builder turns a `(name, pattern)` pair into a factory, and the built-in
//! formats are a static table fed through it.

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::expression::is_identifier;
use crate::foundation::{
    Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError, ValidatorFactory,
};

/// Built-in `(name, pattern)` table. Patterns are unanchored; the builder
/// anchors them so the whole input must match.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    (
        "email",
        r"\w[-\w.+]*@(?:[A-Za-z0-9][-A-Za-z0-9]+\.)+[A-Za-z]{2,14}",
    ),
    (
        "ipv4",
        r"(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
    ),
    (
        "ipv6",
        concat!(
            r"(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}",
            r"|(?:[0-9a-fA-F]{1,4}:){1,7}:",
            r"|(?:[0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
            r"|(?:[0-9a-fA-F]{1,4}:){1,5}(?::[0-9a-fA-F]{1,4}){1,2}",
            r"|(?:[0-9a-fA-F]{1,4}:){1,4}(?::[0-9a-fA-F]{1,4}){1,3}",
            r"|(?:[0-9a-fA-F]{1,4}:){1,3}(?::[0-9a-fA-F]{1,4}){1,4}",
            r"|(?:[0-9a-fA-F]{1,4}:){1,2}(?::[0-9a-fA-F]{1,4}){1,5}",
            r"|[0-9a-fA-F]{1,4}:(?::[0-9a-fA-F]{1,4}){1,6}",
            r"|:(?:(?::[0-9a-fA-F]{1,4}){1,7}|:)",
            // IPv4 tail: six groups, or fewer around a single `::`
            r"|(?:[0-9a-fA-F]{1,4}:){6}(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|::(?:[0-9a-fA-F]{1,4}:){0,5}(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|[0-9a-fA-F]{1,4}::(?:[0-9a-fA-F]{1,4}:){0,4}(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|(?:[0-9a-fA-F]{1,4}:){2}:(?:[0-9a-fA-F]{1,4}:){0,3}(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|(?:[0-9a-fA-F]{1,4}:){3}:(?:[0-9a-fA-F]{1,4}:){0,2}(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|(?:[0-9a-fA-F]{1,4}:){4}:(?:[0-9a-fA-F]{1,4}:)?(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
            r"|(?:[0-9a-fA-F]{1,4}:){5}:(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
        ),
    ),
    (
        "phone",
        r"(?:13[0-9]|14[57]|15[0-35-9]|17[678]|18[0-9])(?:[0-9]{8}|170[059][0-9]{7})",
    ),
    ("idcard", r"[0-9]{15}|[0-9]{17}[0-9Xx]"),
    (
        "url",
        r#"\b(?:(?:[a-z][\w-]+:(?:/{1,3}|[a-z0-9%])|www[0-9]{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\((?:[^\s()<>]+|(?:\([^\s()<>]+\)))*\))+(?:\((?:[^\s()<>]+|(?:\([^\s()<>]+\)))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’]))"#,
    ),
];

// ============================================================================
// VALIDATOR
// ============================================================================

/// Accepts strings that fully match the pattern.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    name: Arc<str>,
    pattern: Regex,
}

impl PatternValidator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl CoreValidator for PatternValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = value
            .as_str()
            .ok_or_else(|| Invalid::new("invalid_type", "value must be string"))?;
        if self.pattern.is_match(text) {
            Ok(value.clone())
        } else {
            Err(Invalid::invalid(&self.name))
        }
    }
}

// ============================================================================
// FACTORY
// ============================================================================

/// Factory producing a [`PatternValidator`] for one named format.
///
/// Takes no arguments. Cloning shares the compiled regex.
#[derive(Debug, Clone)]
pub struct PatternFactory {
    name: Arc<str>,
    pattern: Regex,
}

impl PatternFactory {
    /// Wraps an already compiled pattern. The pattern is used as-is, so it
    /// should be anchored.
    pub fn new(name: impl Into<Arc<str>>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ValidatorFactory for PatternFactory {
    fn build(&self, _args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        Ok(Box::new(PatternValidator {
            name: Arc::clone(&self.name),
            pattern: self.pattern.clone(),
        }))
    }
}

/// Builds a factory for a named text format; the whole input must match
/// `pattern`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validr::foundation::{Arguments, ValidatorFactory};
/// use validr::validators::build_pattern_validator;
///
/// let factory = build_pattern_validator("hex", "[0-9a-f]+").unwrap();
/// let v = factory.build(&mut Arguments::empty("hex")).unwrap();
/// assert!(v.validate(&json!("c0ffee")).is_ok());
/// assert_eq!(v.validate(&json!("c0ffee!")).unwrap_err().to_string(), "invalid hex");
/// ```
pub fn build_pattern_validator(name: &str, pattern: &str) -> Result<PatternFactory, SchemaError> {
    if !is_identifier(name) {
        return Err(SchemaError::config(format!(
            "pattern validator name '{name}' is not an identifier"
        )));
    }
    let anchored = format!("^(?:{pattern})$");
    let regex = Regex::new(&anchored).map_err(|e| {
        SchemaError::config(format!("invalid pattern for validator '{name}': {e}"))
    })?;
    Ok(PatternFactory::new(name, regex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator(name: &str) -> BoxedValidator {
        let (_, pattern) = BUILTIN_PATTERNS
            .iter()
            .find(|(n, _)| *n == name)
            .expect("builtin pattern");
        build_pattern_validator(name, pattern)
            .unwrap()
            .build(&mut Arguments::empty(name))
            .unwrap()
    }

    #[test]
    fn test_all_builtin_patterns_compile() {
        for (name, pattern) in BUILTIN_PATTERNS {
            assert!(build_pattern_validator(name, pattern).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_ipv4_octets() {
        let v = validator("ipv4");
        assert!(v.validate(&json!("192.168.0.1")).is_ok());
        assert!(v.validate(&json!("0.0.0.0")).is_ok());
        assert!(v.validate(&json!("256.1.1.1")).is_err());
        assert!(v.validate(&json!("01.1.1.1")).is_err());
        assert!(v.validate(&json!("1.1.1")).is_err());
    }

    #[test]
    fn test_full_match_required() {
        // idcard alternation must be anchored as a whole
        let v = validator("idcard");
        assert!(v.validate(&json!("123456789012345")).is_ok());
        assert!(v.validate(&json!("12345678901234567X")).is_ok());
        assert!(v.validate(&json!("a12345678901234567X")).is_err());
        assert!(v.validate(&json!("1234567890123456")).is_err());
    }

    #[test]
    fn test_non_string_rejected() {
        let v = validator("email");
        let err = v.validate(&json!(42)).unwrap_err();
        assert_eq!(err.to_string(), "value must be string");
    }

    #[test]
    fn test_mismatch_names_the_format() {
        let v = validator("email");
        let err = v.validate(&json!("not-an-email")).unwrap_err();
        assert_eq!(err.code, "invalid_email");
        assert_eq!(err.to_string(), "invalid email");
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(build_pattern_validator("bad name", "x").is_err());
        assert!(build_pattern_validator("broken", "(unclosed").is_err());
    }
}
