//! Deep-freeze: build-then-seal.
//!
//! Mutable drafts are turned into immutable values by [`Freeze::freeze`].
//! Composite drafts freeze every child before sealing themselves
//! (post-order), so no reachable sub-structure is left mutable:
//!
//! ```text
//! RoleRegistryBuilder
//! ├── RoleDraft "admin"  ── PermissionDraft ──► PermissionSet  (1)
//! │                                         ──► Role           (2)
//! ├── RoleDraft "guest"  ── PermissionDraft ──► PermissionSet  (3)
//! │                                         ──► Role           (4)
//! └──────────────────────────────────────────► RoleRegistry    (5)
//! ```
//!
//! `freeze` consumes the draft, so no mutable handle survives sealing.
//! Frozen types implement [`Freeze`] as the identity, which makes the
//! operation idempotent: freezing a frozen value returns it unchanged.

use crate::permission::{PermissionDraft, PermissionSet};
use crate::registry::{RoleRegistry, RoleRegistryBuilder};
use crate::role::{Role, RoleDraft};

/// Consumes a mutable value and returns its immutable form.
pub trait Freeze {
    /// The immutable form.
    type Frozen;

    /// Seals `self`, children first.
    fn freeze(self) -> Self::Frozen;
}

/// Freezes every item, in order, before the caller seals the parent.
pub fn freeze_all<T, I>(items: I) -> Vec<T::Frozen>
where
    T: Freeze,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(Freeze::freeze).collect()
}

impl Freeze for PermissionDraft {
    type Frozen = PermissionSet;

    fn freeze(self) -> PermissionSet {
        PermissionSet::from_entries(self.into_entries())
    }
}

impl Freeze for RoleDraft {
    type Frozen = Role;

    fn freeze(self) -> Role {
        let (id, permission) = self.into_parts();
        let permission = permission.freeze();
        tracing::trace!(role = %id, capabilities = permission.len(), "role frozen");
        Role::new(id, permission)
    }
}

impl Freeze for RoleRegistryBuilder {
    type Frozen = RoleRegistry;

    fn freeze(self) -> RoleRegistry {
        let roles = freeze_all(self.into_drafts());
        let registry = RoleRegistry::from_roles(roles);
        tracing::debug!(roles = registry.len(), "role registry frozen");
        registry
    }
}

impl Freeze for PermissionSet {
    type Frozen = Self;

    fn freeze(self) -> Self {
        self
    }
}

impl Freeze for Role {
    type Frozen = Self;

    fn freeze(self) -> Self {
        self
    }
}

impl Freeze for RoleRegistry {
    type Frozen = Self;

    fn freeze(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(flags: &[(&str, bool)]) -> PermissionDraft {
        let mut d = PermissionDraft::new();
        for (name, granted) in flags {
            d.try_set(name, *granted).expect("valid name");
        }
        d
    }

    #[test]
    fn freeze_all_preserves_order() {
        let sets = freeze_all([draft(&[("a", true)]), draft(&[("b", false)])]);
        assert_eq!(sets.len(), 2);
        assert!(sets[0].is_granted("a"));
        assert_eq!(sets[1].get("b"), Some(false));
    }

    #[test]
    fn permission_set_freeze_is_identity() {
        let set = draft(&[("login", true)]).freeze();
        let again = set.clone().freeze().freeze();
        assert!(PermissionSet::ptr_eq(&set, &again));
    }

    #[test]
    fn registry_freeze_is_identity() {
        let registry = RoleRegistryBuilder::new()
            .define_str("guest", draft(&[("login", true)]))
            .expect("define guest")
            .freeze();
        let before = registry
            .lookup("guest")
            .expect("registered role")
            .clone();

        let refrozen = registry.freeze();
        let after = refrozen.lookup("guest").expect("registered role");
        assert!(PermissionSet::ptr_eq(&before, after));
        assert_eq!(refrozen.len(), 1);
    }

    #[test]
    fn role_draft_freezes_children_first() {
        let role = RoleDraft::new(
            "admin".parse().expect("valid role id"),
            draft(&[("login", true), ("del", true)]),
        )
        .freeze();

        assert_eq!(role.id(), "admin");
        assert!(role.permission().try_set("del", false).is_err());
        let role = role.freeze();
        assert!(role.permission().is_granted("del"));
    }
}
