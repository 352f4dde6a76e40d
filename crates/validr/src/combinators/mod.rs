//! Combinators layered around core validators.
//!
//! - [`OptionalDefault`]: the `null` / `default` / `optional` policy every
//!   compiled validator goes through.
//! - [`Composed`]: a factory that strips the presence keywords and wraps
//!   what its inner factory builds in [`OptionalDefault`].

pub mod compose;
pub mod optional;

pub use compose::{Composed, compose};
pub use optional::{OptionalDefault, Presence, optional_default};
