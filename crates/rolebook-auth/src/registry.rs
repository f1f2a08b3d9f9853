//! Role registry.
//!
//! The registry is assembled once with [`RoleRegistryBuilder::define`],
//! sealed with [`Freeze::freeze`](crate::Freeze::freeze), and then only
//! read. A frozen [`RoleRegistry`] has no mutation API and is shared
//! across threads without locking.
//!
//! # Example
//!
//! ```
//! use rolebook_auth::{AuthError, Freeze, PermissionDraft, RoleRegistryBuilder};
//!
//! let registry = RoleRegistryBuilder::new()
//!     .define_str(
//!         "guest",
//!         PermissionDraft::new().with("login", true)?.with("del", false)?,
//!     )?
//!     .freeze();
//!
//! let guest = registry.lookup("guest")?;
//! assert!(guest.is_granted("login"));
//!
//! let err = registry.lookup("superadmin").unwrap_err();
//! assert!(matches!(err, AuthError::UnknownRole { .. }));
//! # Ok::<(), AuthError>(())
//! ```

use crate::error::AuthError;
use crate::permission::{PermissionDraft, PermissionSet};
use crate::role::{Role, RoleDraft};
use rolebook_types::{RoleId, TryNew};
use std::collections::HashMap;
use std::sync::Arc;

/// Collects role definitions before the registry is frozen.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistryBuilder {
    drafts: Vec<RoleDraft>,
}

impl RoleRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateRole`] if `id` is already defined.
    pub fn define(mut self, id: RoleId, permission: PermissionDraft) -> Result<Self, AuthError> {
        if self.drafts.iter().any(|d| d.id() == &id) {
            return Err(AuthError::DuplicateRole {
                role: id.to_string(),
            });
        }
        self.drafts.push(RoleDraft::new(id, permission));
        Ok(self)
    }

    /// Validates `id` and registers a role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidIdentifier`] for a malformed id, or
    /// [`AuthError::DuplicateRole`] if it is already defined.
    pub fn define_str(self, id: &str, permission: PermissionDraft) -> Result<Self, AuthError> {
        let id = RoleId::try_new(id.to_string())?;
        self.define(id, permission)
    }

    /// Number of roles defined so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Returns `true` if no role has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub(crate) fn into_drafts(self) -> Vec<RoleDraft> {
        self.drafts
    }
}

#[derive(Debug)]
struct Inner {
    roles: Vec<Role>,
    index: HashMap<RoleId, usize>,
}

/// Frozen mapping from role id to [`Role`].
///
/// Cloning shares the same frozen table.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    inner: Arc<Inner>,
}

impl RoleRegistry {
    pub(crate) fn from_roles(roles: Vec<Role>) -> Self {
        let index = roles
            .iter()
            .enumerate()
            .map(|(i, role)| (role.id().clone(), i))
            .collect();
        Self {
            inner: Arc::new(Inner { roles, index }),
        }
    }

    /// Returns the permission set of `role`.
    ///
    /// Repeated lookups return the same set ([`PermissionSet::ptr_eq`]).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownRole`] if `role` is not registered.
    pub fn lookup(&self, role: &str) -> Result<&PermissionSet, AuthError> {
        self.lookup_role(role).map(Role::permission)
    }

    /// Returns the [`Role`] registered under `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownRole`] if `role` is not registered.
    pub fn lookup_role(&self, role: &str) -> Result<&Role, AuthError> {
        match self.inner.index.get(role) {
            Some(&i) => {
                tracing::debug!(role, "role lookup");
                Ok(&self.inner.roles[i])
            }
            None => {
                tracing::warn!(role, known = self.inner.roles.len(), "unknown role");
                Err(AuthError::unknown_role(role))
            }
        }
    }

    /// Returns `true` if `role` is registered.
    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.inner.index.contains_key(role)
    }

    /// Number of roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.roles.len()
    }

    /// Returns `true` if the registry has no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.roles.is_empty()
    }

    /// Iterates roles in definition order.
    pub fn roles(&self) -> std::slice::Iter<'_, Role> {
        self.inner.roles.iter()
    }

    /// Iterates role ids in definition order.
    pub fn role_ids(&self) -> impl Iterator<Item = &RoleId> {
        self.inner.roles.iter().map(Role::id)
    }
}
