//! Permission views: a subject bound to a permission set.
//!
//! # Ownership
//!
//! [`BindMode`] decides what the view holds:
//!
//! | Mode | View holds | `ptr_eq` with role's set |
//! |------|-----------|--------------------------|
//! | [`Shared`](BindMode::Shared) (default) | the role's own `Arc`-backed set | yes |
//! | [`Copy`](BindMode::Copy) | an independent frozen duplicate | no |
//!
//! Reports are identical in both modes because the set is immutable.
//!
//! # Reassignment
//!
//! Views are not reassignable. [`PermissionView::try_reassign`] always
//! fails, so a subject bound to `guest` cannot swap in the `admin` set.

use crate::error::{AuthError, WriteOp, WriteTarget};
use crate::permission::{Granted, PermissionSet};
use crate::role::Role;
use rolebook_types::{RoleId, Subject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a view takes ownership of a permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Share the role's set.
    #[default]
    Shared,
    /// Take an independent frozen copy.
    Copy,
}

impl BindMode {
    /// Returns `"shared"` or `"copy"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Copy => "copy",
        }
    }

    /// Parses a mode name (case-insensitive).
    ///
    /// ```
    /// use rolebook_auth::BindMode;
    ///
    /// assert_eq!(BindMode::parse("COPY"), Some(BindMode::Copy));
    /// assert_eq!(BindMode::parse("shared"), Some(BindMode::Shared));
    /// assert_eq!(BindMode::parse("clone"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "shared" | "share" => Some(Self::Shared),
            "copy" => Some(Self::Copy),
            _ => None,
        }
    }
}

impl fmt::Display for BindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject bound to a permission set.
///
/// All fields are private and have no setters; the binding is fixed at
/// creation.
///
/// # Example
///
/// ```
/// use rolebook_auth::{BindMode, Freeze, PermissionDraft, PermissionView};
/// use rolebook_types::Subject;
///
/// let guest = PermissionDraft::new()
///     .with("login", true)?
///     .with("del", false)?
///     .freeze();
///
/// let view = PermissionView::bind(Subject::new("Kante"), &guest, BindMode::Copy);
/// assert!(view.try_set_flag("del", true).is_err());
///
/// let granted: Vec<&str> = view.report().map(|c| c.as_str()).collect();
/// assert_eq!(granted, vec!["login"]);
/// # Ok::<(), rolebook_types::IdError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PermissionView {
    subject: Subject,
    role: Option<RoleId>,
    permissions: PermissionSet,
    mode: BindMode,
}

impl PermissionView {
    /// Binds `subject` to `permissions`.
    #[must_use]
    pub fn bind(subject: Subject, permissions: &PermissionSet, mode: BindMode) -> Self {
        Self::bind_inner(subject, None, permissions, mode)
    }

    /// Binds `subject` to a role's permission set, recording the role id.
    #[must_use]
    pub fn bind_role(subject: Subject, role: &Role, mode: BindMode) -> Self {
        Self::bind_inner(subject, Some(role.id().clone()), role.permission(), mode)
    }

    fn bind_inner(
        subject: Subject,
        role: Option<RoleId>,
        permissions: &PermissionSet,
        mode: BindMode,
    ) -> Self {
        let permissions = match mode {
            BindMode::Shared => permissions.clone(),
            BindMode::Copy => permissions.deep_copy(),
        };
        tracing::debug!(
            subject = subject.name(),
            subject_id = %subject.id(),
            role = role.as_ref().map(RoleId::as_str),
            mode = %mode,
            "permission view bound"
        );
        Self {
            subject,
            role,
            permissions,
            mode,
        }
    }

    /// The bound subject.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The role id the view was bound from, if bound via [`bind_role`](Self::bind_role).
    #[must_use]
    pub fn role(&self) -> Option<&RoleId> {
        self.role.as_ref()
    }

    /// The attached permission set.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// How the permission set was attached.
    #[must_use]
    pub fn mode(&self) -> BindMode {
        self.mode
    }

    /// Lazily yields granted capability names in insertion order.
    ///
    /// Each call rescans the (immutable) set.
    #[must_use]
    pub fn report(&self) -> Granted<'_> {
        self.permissions.granted()
    }

    /// Collects [`report`](Self::report) into owned strings.
    #[must_use]
    pub fn granted_names(&self) -> Vec<String> {
        self.report().map(ToString::to_string).collect()
    }

    /// Returns the flag for `capability`, or `None` if absent.
    #[must_use]
    pub fn get(&self, capability: &str) -> Option<bool> {
        self.permissions.get(capability)
    }

    /// Returns `true` only if `capability` is present and granted.
    #[must_use]
    pub fn is_granted(&self, capability: &str) -> bool {
        self.permissions.is_granted(capability)
    }

    /// Always fails: the attached set is frozen.
    ///
    /// # Errors
    ///
    /// Always returns [`AuthError::ImmutableWriteViolation`].
    pub fn try_set_flag(&self, capability: &str, granted: bool) -> Result<(), AuthError> {
        tracing::warn!(
            subject = self.subject.name(),
            capability,
            "flag write attempted through permission view"
        );
        self.permissions.try_set(capability, granted)
    }

    /// Always fails: a view's permission set cannot be swapped.
    ///
    /// # Errors
    ///
    /// Always returns [`AuthError::ImmutableWriteViolation`].
    pub fn try_reassign(&self, replacement: &PermissionSet) -> Result<(), AuthError> {
        tracing::warn!(
            subject = self.subject.name(),
            role = self.role.as_ref().map(RoleId::as_str),
            replacement_granted = replacement.granted().count(),
            "reassign rejected: permission view is immutable"
        );
        Err(AuthError::immutable_write(
            WriteTarget::PermissionView,
            WriteOp::Reassign,
            None,
        ))
    }
}

/// Lazily yields the capabilities granted to `view`.
#[must_use]
pub fn report(view: &PermissionView) -> Granted<'_> {
    view.report()
}
