#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros generating `objconf` descriptor tables.
//! `#[derive(Configurable)]` describes the attributes and the ancestor of a
//! struct, and `#[setters]` describes the setter operations of an inherent
//! impl block.
//!
//! ## Usage
//! The macros are re-exported by `objconf`; depend on that crate instead:
//! ```toml
//! [dependencies]
//! objconf = { path = "../crates/objconf" }
//! ```
//!
//! Generated code refers to `::objconf`, so the macros only work in crates
//! depending on it.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

/// Derive macro implementing `objconf::Configurable` for a struct.
///
/// Every named field is listed in the generated descriptor. Fields marked
/// `#[property]` become configurable properties; the others are listed
/// without metadata and are never touched.
///
/// # Field Attributes
///
/// * `#[property]` - The field is a property named after the field.
/// * `#[property(name = "...")]` - Overrides the property name.
/// * `#[property(required = false)]` - The property may stay unset (default: required).
/// * `#[property(default = "...")]` - Applied by `check` when the property is unset.
/// * `#[property(description = "...")]` - Help text; falls back to the field's doc comment.
/// * `#[configurable(parent)]` - The field holds the ancestor value, whose type
///   must itself be `Configurable`. At most one field can carry it.
///
/// An `Option<T>` property counts as set when it is `Some` and receives values
/// of type `T`. Any other property type receives values directly and always
/// counts as set. Value types must implement `objconf::coerce::PropertyValue`.
///
/// # Type Attributes
///
/// * `#[configurable(setters)]` - Includes the setter operations declared by a
///   `#[setters]` impl block on the same type.
///
/// # Errors
/// Emits a compile-time error for enums, unions, tuple structs, generic
/// types, and unknown or duplicate arguments.
///
/// # Example
///
/// ```rust,ignore
/// use objconf::Configurable;
///
/// #[derive(Default, Configurable)]
/// struct Pool {
///     /// Upper bound of open connections.
///     #[property(name = "max-size", default = "16")]
///     max_size: Option<usize>,
///     #[property(required = false)]
///     label: Option<String>,
/// }
/// ```
#[proc_macro_derive(Configurable, attributes(property, configurable))]
pub fn derive_configurable(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::configurable::expand_derive(input).into()
}

/// Attribute macro implementing `objconf::DeclaredSetters` from an inherent impl block.
///
/// Methods marked `#[setter]` are recorded with their signature shape. Only
/// methods taking `&mut self` and one `&str` or `String`, and returning `()`
/// or `Result<(), E>`, can be invoked as setters; other marked methods still
/// claim their property name and fail with `NotASetter` when set.
///
/// The property name is derived from the method name by stripping the `set`
/// prefix (and a following `_`) and lowercasing the next character, unless
/// `#[setter(name = "...")]` overrides it.
///
/// # Errors
/// Emits a compile-time error for trait impls, generic impls, and unknown or
/// duplicate arguments.
///
/// # Example
///
/// ```rust,ignore
/// use objconf::{Configurable, setters};
///
/// #[derive(Default, Configurable)]
/// #[configurable(setters)]
/// struct Logger {
///     targets: Vec<String>,
/// }
///
/// #[setters]
/// impl Logger {
///     #[setter]
///     fn set_target(&mut self, target: &str) {
///         self.targets.push(target.to_owned());
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn setters(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    macros::setters::expand_setters(args.into(), input).into()
}
