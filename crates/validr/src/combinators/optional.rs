//! OPTIONAL/DEFAULT combinator - the presence policy shared by every validator

use serde_json::Value;

use crate::foundation::{CoreValidator, Invalid};

/// What a validator does with `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presence {
    /// Returned verbatim for `null`, without running the core validator.
    pub default: Option<Value>,
    /// Accept `null` and return it unchanged.
    pub optional: bool,
}

impl Presence {
    /// `null` fails with `required`.
    #[must_use]
    pub fn required() -> Self {
        Self::default()
    }

    /// `null` passes through.
    #[must_use]
    pub fn optional() -> Self {
        Self {
            default: None,
            optional: true,
        }
    }

    /// `null` becomes `value`.
    #[must_use]
    pub fn with_default(value: Value) -> Self {
        Self {
            default: Some(value),
            optional: false,
        }
    }
}

/// Owns a core validator and applies the presence policy before delegating.
///
/// For `null`: the default wins over `optional`, and with neither the value
/// fails with `required`. Any other value goes to the core validator.
/// `desc` is carried as metadata and never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalDefault<V> {
    pub(crate) inner: V,
    presence: Presence,
    desc: Option<String>,
}

impl<V> OptionalDefault<V> {
    pub fn new(inner: V, presence: Presence) -> Self {
        Self {
            inner,
            presence,
            desc: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: CoreValidator> CoreValidator for OptionalDefault<V> {
    fn validate(&self, value: &Value) -> Result<Value, Invalid> {
        if value.is_null() {
            return match &self.presence {
                Presence {
                    default: Some(default),
                    ..
                } => Ok(default.clone()),
                Presence { optional: true, .. } => Ok(Value::Null),
                _ => Err(Invalid::required()),
            };
        }
        self.inner.validate(value)
    }
}

pub fn optional_default<V>(validator: V, presence: Presence) -> OptionalDefault<V> {
    OptionalDefault::new(validator, presence)
}
