//! Typed access helpers used by generated descriptor tables.
//!
//! Generated accessors receive the target as `dyn Any`; these helpers restore
//! the concrete type or report an [`AccessError`].

use crate::error::AccessError;
use std::any::Any;

/// Downcasts a shared target to the type a table was generated for.
///
/// # Errors
/// Returns [`AccessError::TypeMismatch`] naming `T` if the value has another type.
pub fn downcast_ref<T: Any>(target: &dyn Any) -> Result<&T, AccessError> {
    target.downcast_ref::<T>().ok_or_else(mismatch::<T>)
}

/// Downcasts a mutable target to the type a table was generated for.
///
/// # Errors
/// Returns [`AccessError::TypeMismatch`] naming `T` if the value has another type.
pub fn downcast_mut<T: Any>(target: &mut dyn Any) -> Result<&mut T, AccessError> {
    target.downcast_mut::<T>().ok_or_else(mismatch::<T>)
}

fn mismatch<T: Any>() -> AccessError {
    AccessError::TypeMismatch { expected: std::any::type_name::<T>() }
}
