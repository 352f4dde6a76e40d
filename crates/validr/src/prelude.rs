//! Prelude module for convenient imports.
//!
//! `use validr::prelude::*;` brings in the compiler, the traits needed to
//! write custom validators, and the built-in validator types.

// ============================================================================
// FOUNDATION: Core traits, errors, arguments
// ============================================================================

pub use crate::foundation::{
    Arguments, BoxedValidator, CoreValidator, Invalid, SchemaError, ValidatorFactory, from_fn,
    uncomposed,
};

// ============================================================================
// COMPILER
// ============================================================================

pub use crate::compiler::{Compiler, CompilerBuilder, Validator};
pub use crate::config::CompilerConfig;
pub use crate::expression::Literal;
pub use crate::registry::{Registry, RegistryBuilder};

// ============================================================================
// VALIDATORS: Built-in validator types
// ============================================================================

#[cfg(feature = "temporal")]
pub use crate::validators::{DateTimeValidator, DateValidator};
pub use crate::validators::{
    BoolValidator, EnumValidator, FloatValidator, IntValidator, NameValidator, PasswordValidator,
    PatternValidator, StrValidator, build_pattern_validator,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{OptionalDefault, Presence, compose};
