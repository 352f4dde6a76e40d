//! Error types for schema compilation and value validation
//!
//! Two disjoint classes of failure exist:
//!
//! - [`SchemaError`] is raised while an expression is compiled or a registry
//!   is built. It signals a defect in the schema itself.
//! - [`Invalid`] is returned by a compiled validator when a value is
//!   rejected. It is a routine outcome of checking untrusted input.
//!
//! `Invalid` uses `Cow<'static, str>` for zero-allocation in the common case
//! of static codes and messages.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// INVALID
// ============================================================================

/// A value-validation failure.
///
/// Carries a stable machine-readable `code`, the human-readable `message`
/// and optional parameters describing the violated bound.
///
/// # Examples
///
/// ```
/// use validr::foundation::Invalid;
///
/// let error = Invalid::new("max", "value must <= 10").with_param("max", "10");
/// assert_eq!(error.to_string(), "value must <= 10");
/// assert_eq!(error.param("max"), Some("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    /// Error code for programmatic handling.
    ///
    /// Examples: "required", "invalid_int", "max"
    pub code: Cow<'static, str>,

    /// Human-readable reason.
    pub message: Cow<'static, str>,

    /// Ordered key-value parameters (typically 0-2).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl Invalid {
    /// Creates a new failure with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Creates a failure whose code is derived from the message.
    ///
    /// Convenient for custom validators that only care about the reason:
    /// `Invalid::reason("invalid choice")` has code `invalid_choice`.
    pub fn reason(message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        let code: String = message
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        Self::new(code, message)
    }

    /// The value is `null` and neither a default nor `optional` was given.
    #[must_use]
    pub fn required() -> Self {
        Self::new("required", "required")
    }

    /// The value has the wrong shape for the validator, e.g. `invalid int`.
    #[must_use]
    pub fn invalid(kind: &str) -> Self {
        Self::new(format!("invalid_{kind}"), format!("invalid {kind}"))
    }

    /// Adds a parameter to the failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Invalid {}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// A compile-time failure: malformed expression, unknown validator name or
/// bad configuration.
///
/// Never produced while validating values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The expression does not follow the grammar.
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// 0-based character offset of the offending token.
        position: usize,
        /// What was expected or found.
        message: String,
    },

    /// No factory is registered under the expression's validator name.
    #[error("unknown validator '{name}'")]
    UnknownValidator {
        /// The unresolved name.
        name: String,
    },

    /// Registry, configuration or factory-argument error.
    #[error("config error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },
}

impl SchemaError {
    /// Creates a syntax error at `position`.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Creates an unknown-validator error.
    pub fn unknown_validator(name: impl Into<String>) -> Self {
        Self::UnknownValidator { name: name.into() }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns the character offset for syntax errors.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Renders the error with the expression and a caret under the
    /// offending character.
    ///
    /// ```
    /// use validr::foundation::SchemaError;
    ///
    /// let err = SchemaError::syntax(4, "expected ')'");
    /// assert_eq!(
    ///     err.render("int(1"),
    ///     "syntax error at position 4: expected ')'\n  int(1\n      ^"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, expression: &str) -> String {
        match self {
            Self::Syntax { position, .. } => {
                let padding = " ".repeat(*position);
                format!("{self}\n  {expression}\n  {padding}^")
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_is_message() {
        let error = Invalid::new("min", "value must >= 0").with_param("min", "0");
        assert_eq!(error.to_string(), "value must >= 0");
        assert_eq!(error.param("min"), Some("0"));
        assert_eq!(error.param("max"), None);
    }

    #[test]
    fn test_invalid_reason_derives_code() {
        let error = Invalid::reason("invalid choice");
        assert_eq!(error.code, "invalid_choice");
        assert_eq!(error.message, "invalid choice");
    }

    #[test]
    fn test_invalid_kind() {
        let error = Invalid::invalid("int");
        assert_eq!(error.code, "invalid_int");
        assert_eq!(error.to_string(), "invalid int");
    }

    #[test]
    fn test_schema_error_position() {
        assert_eq!(SchemaError::syntax(3, "x").position(), Some(3));
        assert_eq!(SchemaError::unknown_validator("foo").position(), None);
        assert_eq!(
            SchemaError::unknown_validator("foo").to_string(),
            "unknown validator 'foo'"
        );
    }

    #[test]
    fn test_render_non_syntax_error() {
        let err = SchemaError::config("bad");
        assert_eq!(err.render("int"), "config error: bad");
    }
}
