//! # Value Coercion
//!
//! A string becomes a typed value through one of two routes declared by the
//! value type itself:
//!
//! 1. **Construction**: the type is built directly from the string
//!    (`String`, `PathBuf`, and in general anything `From<&str>`).
//! 2. **Factory**: a `value_of` function parses the string
//!    (numbers, `bool`, addresses, and in general anything `FromStr`).
//!
//! Routes are attempted in that order. A route the type does not offer is
//! skipped; a rejected construction falls through to the factory.
//!
//! ```rust
//! use objconf::coerce::{PropertyValue, coerce, from_str_route};
//! use objconf::BoxError;
//!
//! #[derive(Debug, PartialEq)]
//! struct Percent(u8);
//!
//! impl std::str::FromStr for Percent {
//!     type Err = std::num::ParseIntError;
//!
//!     fn from_str(s: &str) -> Result<Self, Self::Err> {
//!         s.trim_end_matches('%').parse().map(Percent)
//!     }
//! }
//!
//! impl PropertyValue for Percent {
//!     fn value_of(raw: &str) -> Option<Result<Self, BoxError>> {
//!         from_str_route(raw)
//!     }
//! }
//!
//! assert_eq!(coerce::<Percent>("42%").ok(), Some(Percent(42)));
//! ```

use crate::error::{BoxError, CoercionError, Route};
use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::{
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Capability of a type to be created from a property string.
///
/// Both routes default to "not offered". Each returns `None` when the type has
/// no such route, or the outcome of the attempt otherwise.
pub trait PropertyValue: Sized + 'static {
    /// Builds the value directly from the string.
    fn construct(raw: &str) -> Option<Result<Self, BoxError>> {
        let _ = raw;
        None
    }

    /// Static factory parsing the string.
    fn value_of(raw: &str) -> Option<Result<Self, BoxError>> {
        let _ = raw;
        None
    }
}

/// Creates a `T` from `raw`, trying construction first and the factory second.
///
/// # Errors
/// Returns [`CoercionError::NoRoute`] if `T` offers neither route, or
/// [`CoercionError::Rejected`] with the cause of the last route attempted.
pub fn coerce<T: PropertyValue>(raw: &str) -> Result<T, CoercionError> {
    let constructed = match T::construct(raw) {
        Some(Ok(value)) => return Ok(value),
        Some(Err(source)) => Some(source),
        None => None,
    };

    match (T::value_of(raw), constructed) {
        (Some(Ok(value)), _) => Ok(value),
        (Some(Err(source)), _) => Err(CoercionError::Rejected { route: Route::Factory, source }),
        (None, Some(source)) => Err(CoercionError::Rejected { route: Route::Construct, source }),
        (None, None) => Err(CoercionError::NoRoute),
    }
}

/// Factory route backed by [`FromStr`].
pub fn from_str_route<T>(raw: &str) -> Option<Result<T, BoxError>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Some(raw.parse::<T>().map_err(Into::into))
}

/// Construction route backed by an infallible `From<&str>`.
pub fn from_string_route<T>(raw: &str) -> Option<Result<T, BoxError>>
where
    T: for<'a> From<&'a str>,
{
    Some(Ok(T::from(raw)))
}

macro_rules! construct_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn construct(raw: &str) -> Option<Result<Self, BoxError>> {
                    from_string_route(raw)
                }
            }
        )*
    };
}

macro_rules! factory_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn value_of(raw: &str) -> Option<Result<Self, BoxError>> {
                    from_str_route(raw)
                }
            }
        )*
    };
}

construct_from_str!(String, PathBuf, OsString, Box<str>, Arc<str>);

factory_from_str!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
    NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize, NonZeroI8,
    NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, IpAddr, Ipv4Addr, Ipv6Addr,
    SocketAddr,
);
