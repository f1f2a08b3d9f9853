//! Roles: a named, immutable bundle of capability grants.

use crate::permission::{PermissionDraft, PermissionSet};
use rolebook_types::RoleId;

/// A frozen role: an id and exactly one [`PermissionSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: RoleId,
    permission: PermissionSet,
}

impl Role {
    pub(crate) fn new(id: RoleId, permission: PermissionSet) -> Self {
        Self { id, permission }
    }

    /// The role id.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// The role's permission set.
    #[must_use]
    pub fn permission(&self) -> &PermissionSet {
        &self.permission
    }
}

/// A role that has not been frozen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    id: RoleId,
    permission: PermissionDraft,
}

impl RoleDraft {
    /// Creates a draft role.
    #[must_use]
    pub fn new(id: RoleId, permission: PermissionDraft) -> Self {
        Self { id, permission }
    }

    /// The role id.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    pub(crate) fn into_parts(self) -> (RoleId, PermissionDraft) {
        (self.id, self.permission)
    }
}
