//! # Configuration Errors
//!
//! [`ConfigurationError`] is the only error surfaced by [`set`](crate::set) and
//! [`check`](crate::check). The remaining types describe the causes attached to it.

use std::borrow::Cow;

/// Boxed fault raised by user code (fallible setters, custom coercion routes).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Common error for all configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A required property has neither a value nor a default.
    #[error("Required property '{property}' is not configured")]
    MissingRequired { property: Cow<'static, str> },

    /// The string value could not be turned into the attribute's type.
    #[error("property {property}: could not create {type_name} instance for {value}")]
    Coercion {
        property: Cow<'static, str>,
        type_name: &'static str,
        value: String,
        #[source]
        source: CoercionError,
    },

    /// The operation bound to the property does not have a setter shape.
    #[error("property {property}: method {method}() is not a setter")]
    NotASetter { property: Cow<'static, str>, method: &'static str },

    /// The setter operation failed.
    #[error("Unable to set property {property}={value} using method {method}()")]
    Setter {
        property: Cow<'static, str>,
        value: String,
        method: &'static str,
        #[source]
        source: BoxError,
    },

    /// The coerced value could not be stored in the attribute.
    #[error("Unable to configure field {field} with property {property}={value}")]
    Assignment {
        field: &'static str,
        property: Cow<'static, str>,
        value: String,
        #[source]
        source: AccessError,
    },

    /// An unexpected fault interrupted the validation walk.
    #[error("Unable to verify object property configuration!")]
    Verification {
        #[source]
        source: AccessError,
    },

    /// No attribute or setter matches the property (strict policy only).
    #[error("Unable to find configuration method for property {property}")]
    UnknownProperty { property: Cow<'static, str> },
}

impl ConfigurationError {
    /// Returns the property the error is about, if it names one.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { property }
            | Self::Coercion { property, .. }
            | Self::NotASetter { property, .. }
            | Self::Setter { property, .. }
            | Self::Assignment { property, .. }
            | Self::UnknownProperty { property } => Some(&**property),
            Self::Verification { .. } => None,
        }
    }
}

/// The coercion route that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Construction directly from the string.
    Construct,
    /// The `value_of` static factory.
    Factory,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Construct => f.write_str("construction"),
            Self::Factory => f.write_str("factory"),
        }
    }
}

/// Why a string could not be coerced.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    /// The type offers neither a construction route nor a factory.
    #[error("no construction or factory route is available")]
    NoRoute,

    /// The last route attempted rejected the value.
    #[error("{route} rejected the value: {source}")]
    Rejected {
        route: Route,
        #[source]
        source: BoxError,
    },
}

/// Faults reaching into a target through its descriptor table.
///
/// These indicate a descriptor table that does not match the value handed to it.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The value is not of the type the accessor was generated for.
    #[error("target is not a `{expected}`")]
    TypeMismatch { expected: &'static str },

    /// The chain is shorter than the depth recorded for an attribute.
    #[error("`{owner}` declares no ancestor (requested depth {depth})")]
    MissingAncestor { owner: &'static str, depth: usize },

    /// The attribute carries property metadata but no accessor functions.
    #[error("attribute `{field}` has no accessor")]
    Unbound { field: &'static str },
}

/// Failure of a generated attribute mutator.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Access(#[from] AccessError),
}
