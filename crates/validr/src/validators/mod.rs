//! Built-in validators
//!
//! Each module provides the core validator types plus the factory the
//! registry installs under the validator's expression name.
//!
//! | Name | Factory | Parameters |
//! |------|---------|------------|
//! | `int` | [`int`] | `min`, `max` |
//! | `float` | [`float`] | `min`, `max`, `exmin`, `exmax` |
//! | `bool` | [`boolean`] | |
//! | `str` | [`string`] | `minlen`, `maxlen`, `escape` |
//! | `password` | [`password`] | `minlen`, `maxlen` |
//! | `name` | [`name`] | `minlen`, `maxlen` |
//! | `enum` | [`enumeration`] | `item, ...` |
//! | `date` / `datetime` | `DateFactory` / `DateTimeFactory` | `format` |
//! | `email`, `ipv4`, `ipv6`, `phone`, `idcard`, `url` | [`PatternFactory`] | |

pub mod boolean;
pub mod enumeration;
pub mod numeric;
pub mod pattern;
pub mod string;
#[cfg(feature = "temporal")]
pub mod temporal;

pub use boolean::{BoolValidator, boolean};
pub use enumeration::{EnumValidator, enumeration};
pub use numeric::{FloatValidator, IntValidator, float, int};
pub use pattern::{
    BUILTIN_PATTERNS, PatternFactory, PatternValidator, build_pattern_validator,
};
pub use string::{NameValidator, PasswordValidator, StrValidator, escape_html, name, password, string};
#[cfg(feature = "temporal")]
pub use temporal::{
    DEFAULT_DATE_FORMAT, DEFAULT_DATETIME_FORMAT, DateFactory, DateTimeFactory, DateTimeValidator,
    DateValidator, check_format,
};
