//! Authorization error type.
//!
//! ```text
//! lookup ──► UnknownRole
//! define ──► DuplicateRole / InvalidIdentifier
//! write  ──► ImmutableWriteViolation   (set, insert, remove, reassign)
//! ```

use rolebook_types::{ErrorCode, IdError};
use std::fmt;
use thiserror::Error;

/// The structure a rejected write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteTarget {
    /// A frozen [`PermissionSet`](crate::PermissionSet).
    PermissionSet,
    /// A bound [`PermissionView`](crate::PermissionView).
    PermissionView,
}

impl fmt::Display for WriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PermissionSet => "permission set",
            Self::PermissionView => "permission view",
        })
    }
}

/// The kind of write that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOp {
    /// Changing an existing flag.
    Set,
    /// Adding a new capability key.
    Insert,
    /// Removing a capability key.
    Remove,
    /// Swapping a view's whole permission set.
    Reassign,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Set => "set",
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Reassign => "reassign",
        })
    }
}

/// Errors raised by the registry, the binder and rejected writes.
///
/// # Example
///
/// ```
/// use rolebook_auth::AuthError;
/// use rolebook_types::ErrorCode;
///
/// let err = AuthError::unknown_role("superadmin");
/// assert_eq!(err.to_string(), "unknown role 'superadmin'");
/// assert_eq!(err.code(), "AUTH_UNKNOWN_ROLE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Lookup for a role id that is not registered.
    #[error("unknown role '{role}'")]
    UnknownRole {
        /// The requested role id.
        role: String,
    },

    /// A role id was defined twice while building the registry.
    #[error("role '{role}' is already defined")]
    DuplicateRole {
        /// The duplicated role id.
        role: String,
    },

    /// Attempted mutation of a frozen structure.
    #[error("immutable write violation: cannot {operation} {target}{}", key_suffix(.key))]
    ImmutableWriteViolation {
        /// What the write was aimed at.
        target: WriteTarget,
        /// What kind of write it was.
        operation: WriteOp,
        /// The capability key involved, if any.
        key: Option<String>,
    },

    /// A role id or capability name failed validation.
    #[error(transparent)]
    InvalidIdentifier(#[from] IdError),
}

fn key_suffix(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!(" (key '{k}')"))
        .unwrap_or_default()
}

impl AuthError {
    /// Creates an [`AuthError::UnknownRole`].
    pub fn unknown_role(role: impl Into<String>) -> Self {
        Self::UnknownRole { role: role.into() }
    }

    /// Creates an [`AuthError::ImmutableWriteViolation`].
    pub fn immutable_write(
        target: WriteTarget,
        operation: WriteOp,
        key: Option<&str>,
    ) -> Self {
        Self::ImmutableWriteViolation {
            target,
            operation,
            key: key.map(str::to_string),
        }
    }

    /// Returns `true` for [`AuthError::ImmutableWriteViolation`].
    #[must_use]
    pub fn is_write_violation(&self) -> bool {
        matches!(self, Self::ImmutableWriteViolation { .. })
    }
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole { .. } => "AUTH_UNKNOWN_ROLE",
            Self::DuplicateRole { .. } => "AUTH_DUPLICATE_ROLE",
            Self::ImmutableWriteViolation { .. } => "AUTH_IMMUTABLE_WRITE",
            Self::InvalidIdentifier(_) => "AUTH_INVALID_IDENTIFIER",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::UnknownRole { .. } | Self::InvalidIdentifier(_) => true,
            Self::DuplicateRole { .. } | Self::ImmutableWriteViolation { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolebook_types::assert_error_codes;

    #[test]
    fn write_violation_display_with_key() {
        let err = AuthError::immutable_write(WriteTarget::PermissionSet, WriteOp::Set, Some("del"));
        assert_eq!(
            err.to_string(),
            "immutable write violation: cannot set permission set (key 'del')"
        );
        assert!(err.is_write_violation());
    }

    #[test]
    fn write_violation_display_without_key() {
        let err = AuthError::immutable_write(WriteTarget::PermissionView, WriteOp::Reassign, None);
        assert_eq!(
            err.to_string(),
            "immutable write violation: cannot reassign permission view"
        );
    }

    #[test]
    fn recoverability() {
        assert!(AuthError::unknown_role("x").is_recoverable());
        assert!(!AuthError::immutable_write(WriteTarget::PermissionSet, WriteOp::Remove, None)
            .is_recoverable());
        assert!(!AuthError::DuplicateRole { role: "a".into() }.is_recoverable());
    }

    #[test]
    fn codes_follow_convention() {
        assert_error_codes(
            &[
                AuthError::unknown_role("x"),
                AuthError::DuplicateRole { role: "x".into() },
                AuthError::immutable_write(WriteTarget::PermissionSet, WriteOp::Insert, None),
                AuthError::from(IdError::Empty { kind: "role id" }),
            ],
            "AUTH_",
        );
    }
}
