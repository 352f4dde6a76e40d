//! # validr
//!
//! Compiles compact schema expressions into reusable value validators.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::{Value, json};
//! use validr::Compiler;
//!
//! let compiler = Compiler::builtin().unwrap();
//!
//! let score = compiler.parse("int(min=0,max=100)&optional").unwrap();
//! assert_eq!(score.validate(&json!("42")), Ok(json!(42)));
//! assert_eq!(score.validate(&Value::Null), Ok(Value::Null));
//!
//! let email = compiler.parse(r#"email&desc="contact address""#).unwrap();
//! assert_eq!(email.validate(&json!("nope")).unwrap_err().to_string(), "invalid email");
//! ```
//!
//! ## Expression Syntax
//!
//! ```text
//! expression := call modifier*
//! call       := name [ "(" [ arg ("," arg)* ] ")" ]
//! arg        := literal | identifier "=" literal
//! modifier   := "&" ( "optional" | "default=" literal | "desc=" quoted )
//! ```
//!
//! Literals are quoted strings, integers, floats, `true`/`false`, or bare
//! words (taken as strings).
//!
//! ## Custom Validators
//!
//! Any `Fn(&mut Arguments) -> Result<BoxedValidator, SchemaError>` is a
//! [`ValidatorFactory`](foundation::ValidatorFactory). The compiler wraps
//! what it builds in the `null` / `default` / `optional` policy, so the
//! factory only implements its business rule:
//!
//! ```
//! use serde_json::json;
//! use validr::prelude::*;
//!
//! fn choice(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
//!     let items = args.rest().into_iter().map(Into::into);
//!     Ok(Box::new(EnumValidator::new(items)))
//! }
//!
//! let compiler = Compiler::builder().validator("choice", choice).build().unwrap();
//! let v = compiler.parse(r#"choice("A","B")&optional"#).unwrap();
//! assert_eq!(v.validate(&json!("A")), Ok(json!("A")));
//! assert!(v.validate(&json!("C")).is_err());
//! assert!(v.validate(&json!(null)).unwrap().is_null());
//! ```
//!
//! ## Built-in Validators
//!
//! - **Numeric**: `int`, `float`, `bool`
//! - **Text**: `str`, `password`, `name`, `enum`
//! - **Temporal** (feature `temporal`): `date`, `datetime`
//! - **Patterns**: `email`, `ipv4`, `ipv6`, `phone`, `idcard`, `url`, plus any
//!   declared in [`CompilerConfig`](config::CompilerConfig)

pub mod combinators;
pub mod compiler;
pub mod config;
pub mod expression;
pub mod foundation;
pub mod prelude;
pub mod registry;
pub mod validators;

pub use compiler::{Compiler, CompilerBuilder, Validator};
pub use foundation::{Invalid, SchemaError};
