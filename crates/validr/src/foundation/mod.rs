//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the compiler:
//!
//! - **Traits**: [`CoreValidator`], [`ValidatorFactory`]
//! - **Errors**: [`Invalid`] (value-time), [`SchemaError`] (compile-time)
//! - **Arguments**: [`Arguments`], the bound parameters of one expression
//!
//! # Architecture
//!
//! ## 1. Business rule only
//!
//! A [`CoreValidator`] checks a non-null value and returns its normalized
//! form. It never decides what `null` means:
//!
//! ```rust,ignore
//! impl CoreValidator for IntValidator {
//!     fn validate(&self, value: &Value) -> Result<Value, Invalid> {
//!         // parse, then check min before max
//!     }
//! }
//! ```
//!
//! ## 2. Centralized presence handling
//!
//! The compiler wraps every factory's validator in
//! [`OptionalDefault`](crate::combinators::OptionalDefault), which applies
//! `default`, `optional` and the `required` failure uniformly.
//!
//! ## 3. Compile-time vs value-time errors
//!
//! Malformed expressions and bad factory arguments surface as
//! [`SchemaError`] from `parse`; data problems surface as [`Invalid`] from
//! the compiled validator. The two never mix.

pub mod arguments;
pub mod error;
pub mod traits;

pub use arguments::Arguments;
pub use error::{Invalid, SchemaError};
pub use traits::{
    BoxedValidator, CoreValidator, FnValidator, Uncomposed, ValidatorFactory, from_fn, uncomposed,
};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Result of validating one value.
pub type ValidationResult<T = serde_json::Value> = Result<T, Invalid>;

/// Result of compiling a schema or building a registry.
pub type SchemaResult<T> = Result<T, SchemaError>;
