//! String validators: `str`, `password`, `name`
//!
//! Lengths are counted in characters, not bytes.

use serde_json::Value;

use crate::foundation::{Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError};

fn must_be_string(value: &Value) -> Result<&str, Invalid> {
    value
        .as_str()
        .ok_or_else(|| Invalid::new("invalid_type", "value must be string"))
}

// ============================================================================
// STR
// ============================================================================

/// Validates text length, converting non-strings to text first.
///
/// Numbers and booleans become their JSON text; arrays and objects become
/// compact JSON. With `escape`, `& > < ' "` are replaced by HTML entities.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validr::foundation::CoreValidator;
/// use validr::validators::StrValidator;
///
/// let v = StrValidator::new(0, 10).escaped();
/// assert_eq!(v.validate(&json!("<b>")), Ok(json!("&lt;b&gt;")));
/// assert_eq!(v.validate(&json!(42)), Ok(json!("42")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrValidator {
    minlen: usize,
    maxlen: usize,
    escape: bool,
}

impl StrValidator {
    /// Default maximum length: 1 MiB of characters.
    pub const DEFAULT_MAXLEN: usize = 1024 * 1024;

    #[must_use]
    pub fn new(minlen: usize, maxlen: usize) -> Self {
        Self {
            minlen,
            maxlen,
            escape: false,
        }
    }

    /// Escape the result into HTML-safe text.
    #[must_use = "builder methods must be chained or built"]
    pub fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }
}

impl Default for StrValidator {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_MAXLEN)
    }
}

/// Replaces `&`, `>`, `<`, `'` and `"` with HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            c => out.push(c),
        }
    }
    out
}

impl CoreValidator for StrValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let len = text.chars().count();
        if len < self.minlen {
            return Err(
                Invalid::new("minlen", format!("string length must >= {}", self.minlen))
                    .with_param("minlen", self.minlen.to_string()),
            );
        }
        if len > self.maxlen {
            return Err(
                Invalid::new("maxlen", format!("string length must <= {}", self.maxlen))
                    .with_param("maxlen", self.maxlen.to_string()),
            );
        }

        if self.escape {
            Ok(Value::String(escape_html(&text)))
        } else {
            Ok(Value::String(text))
        }
    }
}

/// Factory for `str(minlen=0, maxlen=1048576, escape=false)`.
pub fn string(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let mut validator = StrValidator::new(
        args.usize("minlen", 0)?,
        args.usize("maxlen", StrValidator::DEFAULT_MAXLEN)?,
    );
    if args.bool("escape", false)? {
        validator = validator.escaped();
    }
    Ok(Box::new(validator))
}

// ============================================================================
// PASSWORD
// ============================================================================

/// Validates a password: length bounds, printable ASCII without whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordValidator {
    minlen: usize,
    maxlen: usize,
}

impl PasswordValidator {
    #[must_use]
    pub fn new(minlen: usize, maxlen: usize) -> Self {
        Self { minlen, maxlen }
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(6, 16)
    }
}

impl CoreValidator for PasswordValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = must_be_string(value)?;
        let len = text.chars().count();
        if !(self.minlen..=self.maxlen).contains(&len) {
            return Err(Invalid::new(
                "length",
                format!("value must >= {} and <= {}", self.minlen, self.maxlen),
            )
            .with_param("minlen", self.minlen.to_string())
            .with_param("maxlen", self.maxlen.to_string()));
        }
        if text.chars().any(|c| !c.is_ascii() || c.is_whitespace()) {
            return Err(Invalid::new("non_ascii", "value contains non-ascii"));
        }
        Ok(value.clone())
    }
}

/// Factory for `password(minlen=6, maxlen=16)`.
pub fn password(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let defaults = PasswordValidator::default();
    Ok(Box::new(PasswordValidator::new(
        args.usize("minlen", defaults.minlen)?,
        args.usize("maxlen", defaults.maxlen)?,
    )))
}

// ============================================================================
// NAME
// ============================================================================

/// Validates an account-style name: a letter followed by letters, digits
/// or underscores, within length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameValidator {
    minlen: usize,
    maxlen: usize,
}

impl NameValidator {
    #[must_use]
    pub fn new(minlen: usize, maxlen: usize) -> Self {
        Self { minlen, maxlen }
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new(4, 16)
    }
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl CoreValidator for NameValidator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        let text = must_be_string(value)?;
        let len = text.chars().count();
        if !(self.minlen..=self.maxlen).contains(&len) {
            return Err(Invalid::new(
                "length",
                format!("name length must >= {} and <= {}", self.minlen, self.maxlen),
            )
            .with_param("minlen", self.minlen.to_string())
            .with_param("maxlen", self.maxlen.to_string()));
        }
        if !is_name(text) {
            return Err(Invalid::invalid("name"));
        }
        Ok(value.clone())
    }
}

/// Factory for `name(minlen=4, maxlen=16)`.
pub fn name(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let defaults = NameValidator::default();
    Ok(Box::new(NameValidator::new(
        args.usize("minlen", defaults.minlen)?,
        args.usize("maxlen", defaults.maxlen)?,
    )))
}
