//! Schema compiler
//!
//! [`Compiler::parse`] turns an expression such as
//! `int(min=0,max=100)&optional` into a [`Validator`]:
//!
//! 1. tokenize and parse the expression,
//! 2. resolve the validator name in the registry,
//! 3. fold the `&` modifiers into the keyword arguments,
//! 4. build through the presence policy unless the factory opted out,
//! 5. reject any argument the factory left unconsumed.
//!
//! Every compile starts from scratch; nothing but the registry is shared
//! between calls.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::combinators::compose;
use crate::config::CompilerConfig;
use crate::expression::{CallDescription, Literal, parse_expression};
use crate::foundation::{Arguments, CoreValidator, Invalid, SchemaError, ValidatorFactory};
use crate::registry::{Registry, RegistryBuilder, SharedFactory};

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles schema expressions against an immutable registry.
///
/// Cloning is cheap; clones share the registry.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use validr::Compiler;
///
/// let compiler = Compiler::builtin().unwrap();
/// let age = compiler.parse("int(min=0,max=150)&optional").unwrap();
///
/// assert_eq!(age.validate(&json!("42")), Ok(json!(42)));
/// assert_eq!(age.validate(&Value::Null), Ok(Value::Null));
/// assert_eq!(age.validate(&json!(200)).unwrap_err().to_string(), "value must <= 150");
/// ```
#[derive(Clone)]
pub struct Compiler {
    registry: Arc<Registry>,
}

impl Compiler {
    /// Compiler with the built-in validators only.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::builder().build()
    }

    /// Compiler with the built-ins plus `custom`; custom entries win on
    /// name collision.
    pub fn new<I, N>(custom: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, SharedFactory)>,
        N: Into<String>,
    {
        Self::from_config(&CompilerConfig::default(), custom)
    }

    /// Like [`Compiler::new`], with the built-ins configured by `config`.
    pub fn from_config<I, N>(config: &CompilerConfig, custom: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, SharedFactory)>,
        N: Into<String>,
    {
        let mut builder = RegistryBuilder::new().with_builtins(config)?;
        for (name, factory) in custom {
            builder.register_shared(name, factory)?;
        }
        Ok(Self::from_registry(builder.build()))
    }

    pub fn from_registry(registry: Registry) -> Self {
        debug!(validators = registry.len(), "schema compiler ready");
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    /// Returns a new compiler with `custom` layered over this one's
    /// registry. Validators compiled earlier are unaffected.
    pub fn extended<I, N>(&self, custom: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, SharedFactory)>,
        N: Into<String>,
    {
        let mut builder = self.registry.to_builder();
        for (name, factory) in custom {
            builder.register_shared(name, factory)?;
        }
        Ok(Self::from_registry(builder.build()))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Compiles `expression` into a reusable validator.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::Syntax`] for a malformed expression
    /// - [`SchemaError::UnknownValidator`] for an unregistered name
    /// - [`SchemaError::Config`] when the factory rejects its arguments
    pub fn parse(&self, expression: &str) -> Result<Validator, SchemaError> {
        let call = parse_expression(expression)?;
        let factory = self.registry.resolve(&call.name)?;
        let name: Arc<str> = Arc::from(call.name.as_str());

        let mut args = into_arguments(call);
        let desc = args.keyword("desc").and_then(Literal::as_str).map(Arc::from);

        let core = if factory.composes() {
            compose(factory).build(&mut args)?
        } else {
            factory.build(&mut args)?
        };
        args.finish()?;

        debug!(expression, validator = %name, "compiled schema expression");
        Ok(Validator {
            name,
            desc,
            inner: Arc::from(core),
        })
    }
}

/// Positionals and keywords as written, then the modifiers as keywords.
/// A modifier replaces a keyword of the same name.
fn into_arguments(call: CallDescription) -> Arguments {
    let CallDescription {
        name,
        positional,
        keywords,
        modifiers,
    } = call;

    let mut args = Arguments::new(name, positional, keywords);
    if modifiers.optional {
        args.insert_keyword("optional", Literal::Bool(true));
    }
    if let Some(default) = modifiers.default {
        args.insert_keyword("default", default);
    }
    if let Some(desc) = modifiers.desc {
        args.insert_keyword("desc", Literal::Str(desc));
    }
    args
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("registry", &self.registry)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Step-by-step construction of a [`Compiler`].
///
/// ```
/// use serde_json::json;
/// use validr::Compiler;
/// use validr::config::CompilerConfig;
/// use validr::foundation::{Arguments, BoxedValidator, SchemaError};
/// use validr::validators::EnumValidator;
///
/// let compiler = Compiler::builder()
///     .config(CompilerConfig::default().with_pattern("zipcode", "[0-9]{6}"))
///     .validator("choice", |args: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
///         let items = args.rest().into_iter().map(Into::into);
///         Ok(Box::new(EnumValidator::new(items)))
///     })
///     .build()
///     .unwrap();
///
/// assert!(compiler.parse("zipcode").unwrap().validate(&json!("100000")).is_ok());
/// assert!(compiler.parse(r#"choice("A","B")"#).unwrap().validate(&json!("C")).is_err());
/// ```
#[derive(Default)]
pub struct CompilerBuilder {
    config: CompilerConfig,
    custom: Vec<(String, SharedFactory)>,
}

impl CompilerBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a custom validator; it wins over a built-in of the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn validator(
        mut self,
        name: impl Into<String>,
        factory: impl ValidatorFactory + 'static,
    ) -> Self {
        self.custom.push((name.into(), Arc::new(factory)));
        self
    }

    /// Adds a custom validator that is already shared.
    #[must_use = "builder methods must be chained or built"]
    pub fn shared_validator(mut self, name: impl Into<String>, factory: SharedFactory) -> Self {
        self.custom.push((name.into(), factory));
        self
    }

    pub fn build(self) -> Result<Compiler, SchemaError> {
        Compiler::from_config(&self.config, self.custom)
    }
}

impl fmt::Debug for CompilerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let custom: Vec<&str> = self.custom.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("CompilerBuilder")
            .field("config", &self.config)
            .field("custom", &custom)
            .finish()
    }
}

// ============================================================================
// VALIDATOR HANDLE
// ============================================================================

/// A compiled schema expression.
///
/// Owns no compiler state; cloning shares the underlying validator, and
/// clones may be used from any thread.
#[derive(Clone)]
pub struct Validator {
    name: Arc<str>,
    desc: Option<Arc<str>>,
    inner: Arc<dyn CoreValidator>,
}

impl Validator {
    /// Validates `value`, returning its normalized form.
    pub fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        self.inner.validate(value)
    }

    /// Validates a possibly missing value; `None` is treated as `null`.
    pub fn validate_opt(&self, value: Option<&Value>) -> Result<Value, Invalid> {
        self.inner.validate(value.unwrap_or(&Value::Null))
    }

    /// Name of the validator the expression resolved to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `desc` of the expression, if any.
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }
}

impl CoreValidator for Validator {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        self.inner.validate(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("desc", &self.desc)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{BoxedValidator, from_fn, uncomposed};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compiler() -> Compiler {
        Compiler::builtin().unwrap()
    }

    #[test]
    fn test_modifier_folds_into_keywords() {
        let call = parse_expression(r#"int(1,default=2)&default=3&desc="n""#).unwrap();
        let mut args = into_arguments(call);
        assert_eq!(args.keyword("default"), Some(&Literal::Int(3)));
        assert_eq!(args.keyword("desc"), Some(&Literal::Str("n".into())));
        assert_eq!(args.int("min", 0).unwrap(), 1);
    }

    #[test]
    fn test_keyword_optional_and_modifier_combine() {
        let v = compiler().parse("int(optional=false)&optional").unwrap();
        assert_eq!(v.validate(&Value::Null), Ok(Value::Null));

        let v = compiler().parse("int(optional=true)").unwrap();
        assert_eq!(v.validate(&Value::Null), Ok(Value::Null));
    }

    #[test]
    fn test_desc_exposed_on_handle() {
        let v = compiler().parse(r#"str&desc="user name""#).unwrap();
        assert_eq!(v.name(), "str");
        assert_eq!(v.desc(), Some("user name"));

        let v = compiler().parse(r#"str(desc="inline")"#).unwrap();
        assert_eq!(v.desc(), Some("inline"));
    }

    #[test]
    fn test_validate_opt_treats_none_as_null() {
        let v = compiler().parse("int&default=5").unwrap();
        assert_eq!(v.validate_opt(None), Ok(json!(5)));
        assert_eq!(v.validate_opt(Some(&json!(1))), Ok(json!(1)));
    }

    #[test]
    fn test_leftover_arguments_rejected() {
        let err = compiler().parse("int(bogus=1)").unwrap_err();
        assert_eq!(
            err,
            SchemaError::config("int(): unexpected keyword argument 'bogus'")
        );
        assert!(compiler().parse("bool(1)").is_err());
        assert!(compiler().parse("int(1,2,3)").is_err());
    }

    #[test]
    fn test_uncomposed_factory_sees_modifiers() {
        let raw = uncomposed(|args: &mut Arguments| -> Result<BoxedValidator, SchemaError> {
            let fallback = args.take_keyword("default").map(Value::from);
            args.take_keyword("optional");
            args.take_keyword("desc");
            Ok(Box::new(from_fn(move |v: &Value| {
                if v.is_null() {
                    fallback.clone().ok_or_else(|| Invalid::reason("missing"))
                } else {
                    Ok(v.clone())
                }
            })))
        });
        let compiler = Compiler::builder().validator("raw", raw).build().unwrap();

        let v = compiler.parse(r#"raw&default="d"&desc="doc""#).unwrap();
        assert_eq!(v.validate(&Value::Null), Ok(json!("d")));
        assert_eq!(v.desc(), Some("doc"));

        let v = compiler.parse("raw").unwrap();
        assert_eq!(v.validate(&Value::Null).unwrap_err().to_string(), "missing");
    }

    #[test]
    fn test_handle_is_send_sync_and_clone() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<Compiler>();
    }
}
