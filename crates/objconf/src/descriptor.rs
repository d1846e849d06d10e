//! # Descriptor Tables
//!
//! Every configurable type exposes one static [`TypeDescriptor`]. It lists the
//! attributes the type declares (in declaration order), the setter operations
//! declared on it, and an optional link to the single ancestor embedded in it.
//!
//! Tables are normally produced by `#[derive(Configurable)]` and `#[setters]`,
//! but they are plain data and can be written by hand:
//!
//! ```rust
//! use objconf::descriptor::{AttributeDescriptor, Configurable, Property, TypeDescriptor};
//!
//! struct Marker;
//!
//! impl Configurable for Marker {
//!     fn descriptor() -> &'static TypeDescriptor {
//!         static DESCRIPTOR: TypeDescriptor = TypeDescriptor {
//!             name: "Marker",
//!             attributes: &[AttributeDescriptor {
//!                 field: "label",
//!                 type_name: std::any::type_name::<String>,
//!                 property: Some(Property::new().description("free-form label")),
//!                 slot: None,
//!             }],
//!             setters: objconf::descriptor::no_setters,
//!             parent: None,
//!         };
//!         &DESCRIPTOR
//!     }
//! }
//!
//! assert_eq!(Marker::descriptor().attributes[0].property_name(), Some("label"));
//! ```

use crate::error::{AccessError, BoxError, SlotError};
use std::any::Any;
use std::borrow::Cow;

/// Reads whether the attribute currently holds a value.
pub type IsSetFn = fn(&dyn Any) -> Result<bool, AccessError>;

/// Coerces the string and stores the result in the attribute.
pub type AssignFn = fn(&mut dyn Any, &str) -> Result<(), SlotError>;

/// Calls a setter operation with the supplied string.
pub type InvokeFn = fn(&mut dyn Any, &str) -> Result<(), BoxError>;

/// Types whose attributes can be configured from string properties.
pub trait Configurable: Any {
    /// Returns the static descriptor table of the type.
    fn descriptor() -> &'static TypeDescriptor;
}

/// Setter table of a type, produced by `#[setters]` on an inherent `impl` block.
pub trait DeclaredSetters {
    fn setters() -> &'static [SetterDescriptor];
}

/// Setter table accessor for types without setter operations.
#[must_use]
pub const fn no_setters() -> &'static [SetterDescriptor] {
    &[]
}

/// The static description of one configurable type.
#[derive(Debug)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub attributes: &'static [AttributeDescriptor],
    pub setters: fn() -> &'static [SetterDescriptor],
    pub parent: Option<ParentLink>,
}

impl TypeDescriptor {
    /// Returns the setter operations declared directly on this type.
    #[must_use]
    pub fn setters(&self) -> &'static [SetterDescriptor] {
        (self.setters)()
    }

    /// Returns the descriptor of the immediate ancestor, if any.
    #[must_use]
    pub fn ancestor(&self) -> Option<&'static Self> {
        self.parent.as_ref().map(|link| (link.descriptor)())
    }
}

/// Link from a derived type to the ancestor value embedded in it.
#[derive(Debug, Clone, Copy)]
pub struct ParentLink {
    /// The member holding the ancestor value.
    pub field: &'static str,
    pub descriptor: fn() -> &'static TypeDescriptor,
    pub project: fn(&dyn Any) -> Option<&dyn Any>,
    pub project_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

/// A data member declared by a type.
#[derive(Debug)]
pub struct AttributeDescriptor {
    /// The member's own name.
    pub field: &'static str,
    /// The declared value type (the inner type for `Option` members).
    pub type_name: fn() -> &'static str,
    /// Property metadata; `None` for members that are not configurable.
    pub property: Option<Property>,
    pub slot: Option<AttributeSlot>,
}

impl AttributeDescriptor {
    /// Returns the effective property name, or `None` for members without metadata.
    #[must_use]
    pub fn property_name(&self) -> Option<&'static str> {
        self.property
            .as_ref()
            .map(|property| property.name.filter(|n| !n.is_empty()).unwrap_or(self.field))
    }
}

/// Accessor and mutator of a configurable attribute.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSlot {
    pub is_set: IsSetFn,
    pub assign: AssignFn,
}

/// Property metadata attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    /// Explicit property name; the member name is used when absent or empty.
    pub name: Option<&'static str>,
    pub required: bool,
    /// String form of the default value; empty means no default.
    pub default_value: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl Default for Property {
    fn default() -> Self {
        Self::new()
    }
}

impl Property {
    /// Required property named after its member, without default.
    #[must_use]
    pub const fn new() -> Self {
        Self { name: None, required: true, default_value: None, description: None }
    }

    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Returns the declared default, treating an empty string as absent.
    #[must_use]
    pub fn declared_default(&self) -> Option<&'static str> {
        self.default_value.filter(|value| !value.is_empty())
    }
}

/// A setter operation declared by a type.
#[derive(Debug)]
pub struct SetterDescriptor {
    /// The operation's own name.
    pub method: &'static str,
    /// Explicit property name; derived from `method` when absent or empty.
    pub name: Option<&'static str>,
    pub signature: Signature,
    /// Present only for operations generated with a setter shape.
    pub invoke: Option<InvokeFn>,
}

impl SetterDescriptor {
    /// Returns the effective property name of the operation.
    #[must_use]
    pub fn property_name(&self) -> Cow<'static, str> {
        match self.name.filter(|n| !n.is_empty()) {
            Some(name) => Cow::Borrowed(name),
            None => setter_property_name(self.method),
        }
    }

    /// Returns the invoker if the operation can be used as a setter.
    #[must_use]
    pub fn setter(&self) -> Option<InvokeFn> {
        self.invoke.filter(|_| self.signature.is_setter())
    }
}

/// Derives a property name from a setter's method name.
///
/// The `set` prefix is stripped together with a following `_`, and the next
/// character is lower-cased. Names without the prefix are returned unchanged.
///
/// ```rust
/// use objconf::descriptor::setter_property_name;
///
/// assert_eq!(setter_property_name("set_timeout"), "timeout");
/// assert_eq!(setter_property_name("setTimeout"), "timeout");
/// assert_eq!(setter_property_name("timeout"), "timeout");
/// ```
#[must_use]
pub fn setter_property_name(method: &'static str) -> Cow<'static, str> {
    let Some(rest) = method.strip_prefix("set") else {
        return Cow::Borrowed(method);
    };
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        None => Cow::Borrowed(method),
        Some(first) if first.is_lowercase() || !first.is_alphabetic() => Cow::Borrowed(rest),
        Some(first) => Cow::Owned(first.to_lowercase().chain(chars).collect()),
    }
}

/// Structural shape of an operation, recorded at declaration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub receiver: Receiver,
    pub params: &'static [Param],
    pub output: Output,
}

impl Signature {
    /// The canonical setter shape: `fn(&mut self, &str)`.
    pub const SETTER: Self =
        Self { receiver: Receiver::Mut, params: &[Param::Str], output: Output::Unit };

    /// Returns `true` for `&mut self` operations taking one string and producing nothing.
    #[must_use]
    pub const fn is_setter(&self) -> bool {
        matches!(self.receiver, Receiver::Mut)
            && matches!(self.params, [Param::Str | Param::String])
            && matches!(self.output, Output::Unit | Output::Fallible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `&mut self`
    Mut,
    /// `&self`
    Shared,
    /// `self`
    Value,
    /// Associated function without receiver.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// `&str`
    Str,
    /// `String`
    String,
    /// Any other type, spelled as declared.
    Other(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// `()`
    Unit,
    /// `Result<(), E>`
    Fallible,
    /// Any other type, spelled as declared.
    Other(&'static str),
}
