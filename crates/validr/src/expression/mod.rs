//! Schema expressions: the `name(args)&modifier` DSL
//!
//! ```text
//! expression   := call modifier*
//! call         := name [ "(" arglist ")" ]
//! arglist      := arg ("," arg)*
//! arg          := literal | identifier "=" literal
//! literal      := quoted-string | number | bareword
//! modifier     := "&" ( "optional" | "default=" literal | "desc=" quoted-string )
//! ```
//!
//! [`parse_expression`] turns text into a [`CallDescription`]; the compiler
//! then resolves the name and hands the arguments to a factory.

mod parser;

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

pub use parser::{ExpressionParser, parse_expression};

// ============================================================================
// LITERAL
// ============================================================================

/// A decoded argument literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted string or non-numeric bareword.
    Str(String),
    /// Integer-looking bareword within `i64` range.
    Int(i64),
    /// Float-looking bareword with a finite value.
    Float(f64),
    /// Bareword `true` / `false`.
    Bool(bool),
}

impl Literal {
    /// Name of the literal's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns the string content, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the literal into a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Int(n) => Value::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Str(s) => Self::String(s),
            other => other.to_value(),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Renders the literal in expression syntax.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ============================================================================
// CALL DESCRIPTION
// ============================================================================

/// Modifiers collected from the `&`-separated suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
    /// `&optional`
    pub optional: bool,
    /// `&default=<literal>`
    pub default: Option<Literal>,
    /// `&desc="..."`, documentation only.
    pub desc: Option<String>,
}

/// Parsed form of one schema expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescription {
    /// Validator name, an identifier.
    pub name: String,
    /// Positional literals in declaration order.
    pub positional: Vec<Literal>,
    /// Keyword literals in declaration order; names are unique.
    pub keywords: IndexMap<String, Literal>,
    /// Suffix modifiers.
    pub modifiers: Modifiers,
}

impl CallDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            keywords: IndexMap::new(),
            modifiers: Modifiers::default(),
        }
    }
}

/// Canonical expression text: no whitespace, arguments in order.
impl fmt::Display for CallDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.positional.is_empty() || !self.keywords.is_empty() {
            f.write_str("(")?;
            let positional = self.positional.iter().map(ToString::to_string);
            let keywords = self.keywords.iter().map(|(k, v)| format!("{k}={v}"));
            for (i, arg) in positional.chain(keywords).enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&arg)?;
            }
            f.write_str(")")?;
        }
        if self.modifiers.optional {
            f.write_str("&optional")?;
        }
        if let Some(default) = &self.modifiers.default {
            write!(f, "&default={default}")?;
        }
        if let Some(desc) = &self.modifiers.desc {
            write!(f, "&desc={}", Literal::Str(desc.clone()))?;
        }
        Ok(())
    }
}

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Returns true if `name` is a valid validator / keyword identifier:
/// ASCII letters, digits and underscore, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("int"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("ipv4"));
        assert!(!is_identifier("4ipv"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("ipv6-style"));
    }

    #[test]
    fn test_literal_to_value() {
        assert_eq!(Literal::Int(5).to_value(), json!(5));
        assert_eq!(Literal::Float(1.5).to_value(), json!(1.5));
        assert_eq!(Literal::from("x").to_value(), json!("x"));
        assert_eq!(Value::from(Literal::Bool(true)), json!(true));
    }

    #[test]
    fn test_literal_display_escapes() {
        assert_eq!(Literal::Str(r#"a"b\c"#.into()).to_string(), r#""a\"b\\c""#);
        assert_eq!(Literal::Float(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_call_display_is_canonical() {
        let call = parse_expression(r#" int ( 0 , max = 10 ) & optional & desc = "age" "#).unwrap();
        assert_eq!(call.to_string(), r#"int(0,max=10)&optional&desc="age""#);
    }
}
