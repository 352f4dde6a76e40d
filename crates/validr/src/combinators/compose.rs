//! COMPOSE combinator - lifts a factory into the presence policy

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::combinators::{OptionalDefault, Presence};
use crate::expression::Literal;
use crate::foundation::{Arguments, BoxedValidator, SchemaError, ValidatorFactory};

// ============================================================================
// COMPOSED FACTORY
// ============================================================================

/// A factory whose validators go through [`OptionalDefault`].
///
/// Before delegating, `build` strips the `default`, `optional` and `desc`
/// keywords from the arguments, so the inner factory only ever sees its own
/// parameters.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use serde_json::{Value, json};
/// use validr::combinators::compose;
/// use validr::expression::Literal;
/// use validr::foundation::{Arguments, ValidatorFactory};
/// use validr::validators::int;
///
/// let factory = compose(Arc::new(int));
/// let mut args = Arguments::empty("int");
/// args.insert_keyword("default", Literal::Int(7));
///
/// let v = factory.build(&mut args).unwrap();
/// assert_eq!(v.validate(&Value::Null), Ok(json!(7)));
/// assert_eq!(v.validate(&json!("3")), Ok(json!(3)));
/// ```
#[derive(Clone)]
pub struct Composed {
    inner: Arc<dyn ValidatorFactory>,
}

impl Composed {
    pub fn new(inner: Arc<dyn ValidatorFactory>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<dyn ValidatorFactory> {
        &self.inner
    }
}

impl fmt::Debug for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composed").finish_non_exhaustive()
    }
}

impl ValidatorFactory for Composed {
    fn build(&self, args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
        let default = args.take_keyword("default").map(Value::from);
        let optional = match args.take_keyword("optional") {
            None => false,
            Some(Literal::Bool(b)) => b,
            Some(other) => return Err(args.type_error("optional", "a bool", &other)),
        };
        let desc = match args.take_keyword("desc") {
            None => None,
            Some(Literal::Str(s)) => Some(s),
            Some(other) => return Err(args.type_error("desc", "a string", &other)),
        };

        let core = self.inner.build(args)?;
        let mut validator = OptionalDefault::new(core, Presence { default, optional });
        if let Some(desc) = desc {
            validator = validator.with_desc(desc);
        }
        Ok(Box::new(validator))
    }
}

/// Wraps `factory` in the presence policy.
pub fn compose(factory: Arc<dyn ValidatorFactory>) -> Composed {
    Composed::new(factory)
}
