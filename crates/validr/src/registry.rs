//! Validator registry
//!
//! Maps validator names to factories. A [`RegistryBuilder`] collects the
//! built-ins and caller-supplied factories; [`RegistryBuilder::build`]
//! freezes them into an immutable [`Registry`] that is shared read-only by
//! every compile.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::config::CompilerConfig;
use crate::expression::is_identifier;
use crate::foundation::{SchemaError, ValidatorFactory};
use crate::validators::{self, BUILTIN_PATTERNS, build_pattern_validator};

/// Shared handle to a factory.
pub type SharedFactory = Arc<dyn ValidatorFactory>;

/// Immutable name to factory mapping.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, SharedFactory>,
}

impl Registry {
    /// Registry holding the built-ins under the default configuration.
    pub fn builtin() -> Result<Self, SchemaError> {
        Ok(RegistryBuilder::new()
            .with_builtins(&CompilerConfig::default())?
            .build())
    }

    /// Looks up the factory registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<SharedFactory, SchemaError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SchemaError::unknown_validator(name))?;
        trace!(validator = name, "resolved validator factory");
        Ok(Arc::clone(factory))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Starts a new builder seeded with every entry of this registry.
    ///
    /// The registry itself is left untouched.
    pub fn to_builder(&self) -> RegistryBuilder {
        RegistryBuilder {
            factories: self.factories.clone(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("validators", &self.names())
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects factories for a [`Registry`]. Later registrations win.
#[derive(Default)]
pub struct RegistryBuilder {
    factories: HashMap<String, SharedFactory>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in validator, configured by `config`.
    pub fn with_builtins(mut self, config: &CompilerConfig) -> Result<Self, SchemaError> {
        self.register_numeric_validators()?;
        self.register_string_validators()?;
        self.register_temporal_validators(config)?;
        self.register_pattern_validators(config)?;
        Ok(self)
    }

    /// Adds or replaces the factory for `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl ValidatorFactory + 'static,
    ) -> Result<&mut Self, SchemaError> {
        self.register_shared(name, Arc::new(factory))
    }

    /// Adds or replaces the factory for `name` with an already shared one.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        factory: SharedFactory,
    ) -> Result<&mut Self, SchemaError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(SchemaError::config(format!(
                "validator name '{name}' is not an identifier"
            )));
        }
        if self.factories.insert(name.clone(), factory).is_some() {
            trace!(validator = %name, "overrode validator factory");
        }
        Ok(self)
    }

    /// Registers a regex-backed validator through the generic builder.
    pub fn register_pattern(&mut self, name: &str, pattern: &str) -> Result<&mut Self, SchemaError> {
        let factory = build_pattern_validator(name, pattern)?;
        self.register(name, factory)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn build(self) -> Registry {
        Registry {
            factories: self.factories,
        }
    }

    // Registration methods for each category

    fn register_numeric_validators(&mut self) -> Result<(), SchemaError> {
        self.register("int", validators::int)?;
        self.register("float", validators::float)?;
        self.register("bool", validators::boolean)?;
        Ok(())
    }

    fn register_string_validators(&mut self) -> Result<(), SchemaError> {
        self.register("str", validators::string)?;
        self.register("password", validators::password)?;
        self.register("name", validators::name)?;
        self.register("enum", validators::enumeration)?;
        Ok(())
    }

    #[cfg(feature = "temporal")]
    fn register_temporal_validators(&mut self, config: &CompilerConfig) -> Result<(), SchemaError> {
        self.register("date", validators::DateFactory::new(config.date_format.as_str())?)?;
        self.register(
            "datetime",
            validators::DateTimeFactory::new(config.datetime_format.as_str())?,
        )?;
        Ok(())
    }

    #[cfg(not(feature = "temporal"))]
    fn register_temporal_validators(&mut self, _config: &CompilerConfig) -> Result<(), SchemaError> {
        Ok(())
    }

    fn register_pattern_validators(&mut self, config: &CompilerConfig) -> Result<(), SchemaError> {
        for (name, pattern) in BUILTIN_PATTERNS {
            self.register_pattern(name, pattern)?;
        }
        for (name, pattern) in &config.patterns {
            self.register_pattern(name, pattern)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort_unstable();
        f.debug_struct("RegistryBuilder")
            .field("validators", &names)
            .finish()
    }
}
