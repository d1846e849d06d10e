//! # Configurator
//!
//! The `set`/`check` façade composed from the binder and the registry.

use crate::binder;
use crate::descriptor::{Configurable, Property};
use crate::error::{AccessError, ConfigurationError};
use crate::registry::{self, DeclaredAttribute};
use std::any::Any;
use tracing::{debug, trace, warn};

/// What [`Configurator::set`] does with a property nothing declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownProperty {
    /// Log a warning and leave the target untouched.
    #[default]
    Warn,
    /// Fail with [`ConfigurationError::UnknownProperty`].
    Fail,
}

/// Applies string properties to configurable targets and validates them.
///
/// The default configurator tolerates unknown properties, logging a warning
/// for each one.
///
/// # Example
///
/// ```rust
/// use objconf::{Configurable, Configurator};
///
/// #[derive(Debug, Default, Configurable)]
/// struct Listener {
///     #[property]
///     port: Option<u16>,
///     #[property(default = "30", required = false)]
///     timeout: Option<u64>,
/// }
///
/// # fn main() -> Result<(), objconf::ConfigurationError> {
/// let mut listener = Listener::default();
/// let configurator = Configurator::new();
///
/// configurator.set(&mut listener, "port", "8080")?;
/// configurator.check(&mut listener)?;
///
/// assert_eq!(listener.port, Some(8080));
/// assert_eq!(listener.timeout, Some(30));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Configurator {
    unknown: UnknownProperty,
}

impl Configurator {
    /// Creates a configurator that warns about unknown properties.
    #[must_use]
    pub const fn new() -> Self {
        Self { unknown: UnknownProperty::Warn }
    }

    /// Creates a configurator that rejects unknown properties.
    #[must_use]
    pub const fn strict() -> Self {
        Self { unknown: UnknownProperty::Fail }
    }

    /// Sets the policy for properties no attribute or setter declares.
    #[must_use = "The configurator is returned by value and must be used."]
    pub const fn unknown_property(mut self, policy: UnknownProperty) -> Self {
        self.unknown = policy;
        self
    }

    #[must_use]
    pub const fn unknown_property_policy(&self) -> UnknownProperty {
        self.unknown
    }

    /// Sets the property `name` on `target` to `value`.
    ///
    /// Setter operations are preferred over attributes. A name nothing declares
    /// is handled according to the [`UnknownProperty`] policy.
    ///
    /// # Errors
    /// Returns the [`ConfigurationError`] raised while applying the value, or
    /// [`ConfigurationError::UnknownProperty`] under [`UnknownProperty::Fail`].
    pub fn set<T: Configurable>(
        &self,
        target: &mut T,
        name: &str,
        value: &str,
    ) -> Result<(), ConfigurationError> {
        let Some(binding) = binder::bind(target, name) else {
            return match self.unknown {
                UnknownProperty::Warn => {
                    warn!("Unable to find configuration method for property {name}");
                    Ok(())
                },
                UnknownProperty::Fail => {
                    Err(ConfigurationError::UnknownProperty { property: name.to_owned().into() })
                },
            };
        };

        binding.assign(value)
    }

    /// Applies every `(name, value)` pair in order, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error raised by [`Configurator::set`].
    pub fn set_all<T, I, K, V>(
        &self,
        target: &mut T,
        properties: I,
    ) -> Result<(), ConfigurationError>
    where
        T: Configurable,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        properties
            .into_iter()
            .try_for_each(|(name, value)| self.set(target, name.as_ref(), value.as_ref()))
    }

    /// Validates `target`: every unset property receives its default, and
    /// required properties without one are reported.
    ///
    /// Members without property metadata and members already holding a value
    /// are left alone. Shadowed ancestor members are validated too.
    ///
    /// # Errors
    /// * [`ConfigurationError::MissingRequired`] for a required property with no value and no
    ///   default.
    /// * Errors raised while applying a default, unchanged.
    /// * [`ConfigurationError::Verification`] for any other fault during the walk.
    #[tracing::instrument(level = "debug", skip_all, fields(target = T::descriptor().name))]
    pub fn check<T: Configurable>(&self, target: &mut T) -> Result<(), ConfigurationError> {
        let leaf = T::descriptor();

        for declared in registry::attributes(Some(leaf)) {
            let Some(property) = declared.attribute.property.as_ref() else {
                continue;
            };
            let verify = |source: AccessError| ConfigurationError::Verification { source };

            let slot = declared
                .attribute
                .slot
                .ok_or(AccessError::Unbound { field: declared.attribute.field })
                .map_err(verify)?;
            let level = registry::project_ref(&*target, leaf, declared.depth).map_err(verify)?;
            if (slot.is_set)(level).map_err(verify)? {
                continue;
            }

            apply_default(target, declared, property)?;
        }

        debug!("configuration verified");
        Ok(())
    }

    /// Applies `properties` and validates the result.
    ///
    /// # Errors
    /// See [`Configurator::set_all`] and [`Configurator::check`].
    pub fn configure<T, I, K, V>(
        &self,
        target: &mut T,
        properties: I,
    ) -> Result<(), ConfigurationError>
    where
        T: Configurable,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.set_all(target, properties)?;
        self.check(target)
    }
}

fn apply_default<T: Configurable>(
    target: &mut T,
    declared: DeclaredAttribute,
    property: &Property,
) -> Result<(), ConfigurationError> {
    let Some(name) = declared.attribute.property_name() else {
        return Ok(());
    };

    match property.declared_default() {
        Some(default) => {
            trace!("setting field property {name} to default value {default}");
            let target: &mut dyn Any = target;
            let leaf = T::descriptor();
            let property = name.to_owned();
            let DeclaredAttribute { depth, attribute, .. } = declared;
            binder::assign_attribute(target, leaf, depth, attribute, property, default)
        },
        None if property.required => {
            Err(ConfigurationError::MissingRequired { property: name.into() })
        },
        None => Ok(()),
    }
}

/// Sets one property with the default [`Configurator`].
///
/// # Errors
/// See [`Configurator::set`].
pub fn set<T: Configurable>(
    target: &mut T,
    name: &str,
    value: &str,
) -> Result<(), ConfigurationError> {
    Configurator::new().set(target, name, value)
}

/// Applies every `(name, value)` pair with the default [`Configurator`].
///
/// # Errors
/// See [`Configurator::set_all`].
pub fn set_all<T, I, K, V>(target: &mut T, properties: I) -> Result<(), ConfigurationError>
where
    T: Configurable,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Configurator::new().set_all(target, properties)
}

/// Validates `target` with the default [`Configurator`].
///
/// # Errors
/// See [`Configurator::check`].
pub fn check<T: Configurable>(target: &mut T) -> Result<(), ConfigurationError> {
    Configurator::new().check(target)
}

/// Applies `properties` and validates `target` with the default [`Configurator`].
///
/// # Errors
/// See [`Configurator::configure`].
pub fn configure<T, I, K, V>(target: &mut T, properties: I) -> Result<(), ConfigurationError>
where
    T: Configurable,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Configurator::new().configure(target, properties)
}
