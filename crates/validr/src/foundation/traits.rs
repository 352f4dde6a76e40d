//! Core traits for the validation system
//!
//! Two capabilities make up every validator:
//!
//! - [`CoreValidator`]: the business rule, `&Value -> Result<Value, Invalid>`.
//! - [`ValidatorFactory`]: builds a `CoreValidator` from the arguments of a
//!   schema expression.

use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{Arguments, Invalid, SchemaError};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The business-rule half of a validator.
///
/// Implementations receive non-null values only when wrapped by
/// [`OptionalDefault`](crate::combinators::OptionalDefault); the wrapper owns
/// the `null` / default / optional policy. A validator returns the
/// normalized value on success.
///
/// Validators must be free of hidden mutable state so a compiled schema can
/// be shared across threads and reused indefinitely.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use validr::foundation::{CoreValidator, Invalid};
///
/// struct Even;
///
/// impl CoreValidator for Even {
///     fn validate(&self, value: &Value) -> Result<Value, Invalid> {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Ok(value.clone()),
///             _ => Err(Invalid::reason("invalid even")),
///         }
///     }
/// }
///
/// assert_eq!(Even.validate(&json!(4)), Ok(json!(4)));
/// assert!(Even.validate(&json!(3)).is_err());
/// ```
pub trait CoreValidator: Send + Sync {
    /// Validates `value`, returning its normalized form.
    fn validate(&self, value: &Value) -> Result<Value, Invalid>;
}

impl<V: CoreValidator + ?Sized> CoreValidator for Box<V> {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        (**self).validate(value)
    }
}

impl<V: CoreValidator + ?Sized> CoreValidator for Arc<V> {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        (**self).validate(value)
    }
}

/// A validator backed by a closure.
#[derive(Clone)]
pub struct FnValidator<F> {
    func: F,
}

impl<F> CoreValidator for FnValidator<F>
where
    F: Fn(&Value) -> Result<Value, Invalid> + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        (self.func)(value)
    }
}

/// Wraps a closure as a [`CoreValidator`].
///
/// ```
/// use serde_json::json;
/// use validr::foundation::{CoreValidator, Invalid, from_fn};
///
/// let upper = from_fn(|v| {
///     v.as_str()
///         .map(|s| json!(s.to_uppercase()))
///         .ok_or_else(|| Invalid::reason("value must be string"))
/// });
/// assert_eq!(upper.validate(&json!("ab")), Ok(json!("AB")));
/// ```
pub fn from_fn<F>(func: F) -> FnValidator<F>
where
    F: Fn(&Value) -> Result<Value, Invalid> + Send + Sync,
{
    FnValidator { func }
}

// ============================================================================
// FACTORY TRAIT
// ============================================================================

/// Boxed validator produced by a factory.
pub type BoxedValidator = Box<dyn CoreValidator>;

/// Builds a validator from the arguments of a schema expression.
///
/// Any `Fn(&mut Arguments) -> Result<BoxedValidator, SchemaError>` is a
/// factory, so built-ins are plain functions and custom validators are
/// usually closures.
///
/// Factories never see `default`, `optional` or `desc`: the compiler strips
/// them and applies them through
/// [`OptionalDefault`](crate::combinators::OptionalDefault), unless
/// [`composes`](ValidatorFactory::composes) returns `false`.
pub trait ValidatorFactory: Send + Sync {
    /// Consumes the arguments the validator understands and returns it.
    ///
    /// Arguments left unconsumed are reported by the compiler.
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError>;

    /// Whether the compiler should wrap the result in the
    /// `null` / default / optional policy.
    fn composes(&self) -> bool {
        true
    }
}

impl<F> ValidatorFactory for F
where
    F: Fn(&mut Arguments) -> Result<BoxedValidator, SchemaError> + Send + Sync,
{
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        self(args)
    }
}

/// A factory that opted out of the composition policy.
///
/// It receives `default`, `optional` and `desc` as ordinary keyword
/// arguments and must handle `null` itself.
pub struct Uncomposed<F> {
    inner: F,
}

impl<F: ValidatorFactory> ValidatorFactory for Uncomposed<F> {
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        self.inner.build(args)
    }

    fn composes(&self) -> bool {
        false
    }
}

/// Opts a factory out of the composition policy.
pub fn uncomposed<F: ValidatorFactory>(factory: F) -> Uncomposed<F> {
    Uncomposed { inner: factory }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct AlwaysValid;

    impl CoreValidator for AlwaysValid {
        fn validate(&self, value: &Value) -> Result<Value, Invalid> {
            Ok(value.clone())
        }
    }

    fn always_valid(_: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        Ok(Box::new(AlwaysValid))
    }

    #[test]
    fn test_boxed_and_shared_delegate() {
        let boxed: BoxedValidator = Box::new(AlwaysValid);
        assert_eq!(boxed.validate(&json!(1)), Ok(json!(1)));

        let shared: Arc<dyn CoreValidator> = Arc::new(AlwaysValid);
        assert_eq!(shared.validate(&json!("x")), Ok(json!("x")));
    }

    #[test]
    fn test_fn_pointer_is_factory() {
        let factory: &dyn ValidatorFactory = &always_valid;
        assert!(factory.composes());
        let mut args = Arguments::empty("always");
        let validator = factory.build(&mut args).unwrap();
        assert_eq!(validator.validate(&json!(true)), Ok(json!(true)));
    }

    #[test]
    fn test_uncomposed_opts_out() {
        let factory = uncomposed(always_valid);
        assert!(!factory.composes());
    }
}
