//! Argument binding for validator factories
//!
//! A factory declares its parameters by asking for them in order. Each
//! request takes the next positional literal if one remains, otherwise the
//! keyword of the same name, otherwise the supplied default; the same rule
//! as a keyword-capable function call.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::expression::Literal;
use crate::foundation::SchemaError;

/// Arguments of one schema-expression call, consumed by a factory.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    validator: String,
    positional: VecDeque<Literal>,
    keywords: IndexMap<String, Literal>,
}

impl Arguments {
    /// Creates the argument set for `validator`.
    pub fn new(
        validator: impl Into<String>,
        positional: Vec<Literal>,
        keywords: IndexMap<String, Literal>,
    ) -> Self {
        Self {
            validator: validator.into(),
            positional: positional.into(),
            keywords,
        }
    }

    /// Creates an argument set without any arguments.
    pub fn empty(validator: impl Into<String>) -> Self {
        Self::new(validator, Vec::new(), IndexMap::new())
    }

    /// Name of the validator the arguments belong to.
    pub fn validator(&self) -> &str {
        &self.validator
    }

    /// Returns true once every argument has been consumed.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Binds the next declared parameter `name`.
    ///
    /// Fails when the parameter is given both positionally and by keyword.
    pub fn param(&mut self, name: &str) -> Result<Option<Literal>, SchemaError> {
        match self.positional.pop_front() {
            Some(literal) => {
                if self.keywords.contains_key(name) {
                    return Err(self.error(format!("got multiple values for argument '{name}'")));
                }
                Ok(Some(literal))
            }
            None => Ok(self.keywords.shift_remove(name)),
        }
    }

    /// Drains every remaining positional literal (variadic parameters).
    pub fn rest(&mut self) -> Vec<Literal> {
        self.positional.drain(..).collect()
    }

    /// Looks at a keyword argument without consuming it.
    pub fn keyword(&self, name: &str) -> Option<&Literal> {
        self.keywords.get(name)
    }

    /// Removes a keyword argument without touching positionals.
    pub fn take_keyword(&mut self, name: &str) -> Option<Literal> {
        self.keywords.shift_remove(name)
    }

    /// Adds or replaces a keyword argument.
    pub fn insert_keyword(&mut self, name: impl Into<String>, literal: Literal) {
        self.keywords.insert(name.into(), literal);
    }

    /// Binds an integer parameter.
    pub fn int(&mut self, name: &str, default: i64) -> Result<i64, SchemaError> {
        match self.param(name)? {
            None => Ok(default),
            Some(Literal::Int(n)) => Ok(n),
            Some(other) => Err(self.type_error(name, "an integer", &other)),
        }
    }

    /// Binds a non-negative integer parameter (lengths, sizes).
    pub fn usize(&mut self, name: &str, default: usize) -> Result<usize, SchemaError> {
        match self.param(name)? {
            None => Ok(default),
            Some(Literal::Int(n)) => usize::try_from(n)
                .map_err(|_| self.error(format!("argument '{name}' must not be negative"))),
            Some(other) => Err(self.type_error(name, "a non-negative integer", &other)),
        }
    }

    /// Binds a number parameter; integers widen to floats.
    pub fn float(&mut self, name: &str, default: f64) -> Result<f64, SchemaError> {
        match self.param(name)? {
            None => Ok(default),
            Some(Literal::Float(f)) => Ok(f),
            Some(Literal::Int(n)) => Ok(n as f64),
            Some(other) => Err(self.type_error(name, "a number", &other)),
        }
    }

    /// Binds a boolean parameter.
    pub fn bool(&mut self, name: &str, default: bool) -> Result<bool, SchemaError> {
        match self.param(name)? {
            None => Ok(default),
            Some(Literal::Bool(b)) => Ok(b),
            Some(other) => Err(self.type_error(name, "a bool", &other)),
        }
    }

    /// Binds a string parameter.
    pub fn string(&mut self, name: &str, default: &str) -> Result<String, SchemaError> {
        match self.param(name)? {
            None => Ok(default.to_owned()),
            Some(Literal::Str(s)) => Ok(s),
            Some(other) => Err(self.type_error(name, "a string", &other)),
        }
    }

    /// Fails if any argument was left unconsumed by the factory.
    pub fn finish(self) -> Result<(), SchemaError> {
        if let Some((name, _)) = self.keywords.first() {
            return Err(self.error(format!("unexpected keyword argument '{name}'")));
        }
        if !self.positional.is_empty() {
            return Err(self.error(format!(
                "{} unexpected positional argument(s)",
                self.positional.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn type_error(&self, name: &str, expected: &str, got: &Literal) -> SchemaError {
        self.error(format!(
            "argument '{name}' must be {expected}, got {}",
            got.type_name()
        ))
    }

    pub(crate) fn error(&self, message: String) -> SchemaError {
        SchemaError::config(format!("{}(): {message}", self.validator))
    }
}
