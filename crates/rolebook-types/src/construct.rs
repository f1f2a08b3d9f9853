//! Fallible construction trait for Rolebook types.
//!
//! # When to Use Which Pattern
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds (infallible) |
//! | [`TryNew`] | Construction requires validation (fallible) |
//! | `TryFrom<T>` | Converting from another type (fallible) |
//!
//! Identifier types such as [`RoleId`](crate::RoleId) and
//! [`CapabilityName`](crate::CapabilityName) implement [`TryNew`] because
//! an arbitrary string is not a valid identifier.
//!
//! # Example
//!
//! ```
//! use rolebook_types::{RoleId, TryNew};
//!
//! assert!(RoleId::try_new("admin".to_string()).is_ok());
//! assert!(RoleId::try_new(String::new()).is_err());
//! ```

/// Trait for fallible construction with validation.
///
/// Types implementing `TryNew` should NOT also have a plain `new()` that
/// performs the same validation. The `try_` prefix makes fallibility
/// explicit at the call site.
pub trait TryNew {
    /// The error type returned when construction fails.
    type Error;

    /// Arguments required for construction.
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if validation fails.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}
