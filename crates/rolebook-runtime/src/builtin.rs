//! Built-in role table.
//!
//! | Role | login | add | del | query |
//! |------|-------|-----|-----|-------|
//! | `admin` | ✓ | ✓ | ✓ | ✓ |
//! | `guest` | ✓ | | | ✓ |
//!
//! The table is frozen once per process and shared by every caller.

use rolebook_auth::{AuthError, Freeze, PermissionDraft, RoleRegistry, RoleRegistryBuilder};
use std::sync::OnceLock;

/// Administrator role id.
pub const ADMIN: &str = "admin";

/// Guest role id.
pub const GUEST: &str = "guest";

const ADMIN_FLAGS: &[(&str, bool)] = &[
    ("login", true),
    ("add", true),
    ("del", true),
    ("query", true),
];
const GUEST_FLAGS: &[(&str, bool)] = &[
    ("login", true),
    ("add", false),
    ("del", false),
    ("query", true),
];

static REGISTRY: OnceLock<RoleRegistry> = OnceLock::new();

fn draft(flags: &[(&str, bool)]) -> Result<PermissionDraft, AuthError> {
    let mut draft = PermissionDraft::new();
    for &(capability, granted) in flags {
        draft.try_set(capability, granted)?;
    }
    Ok(draft)
}

/// Returns an unfrozen builder holding the built-in roles.
///
/// # Errors
///
/// Returns [`AuthError`] only if the built-in table is malformed.
pub fn builtin_roles() -> Result<RoleRegistryBuilder, AuthError> {
    RoleRegistryBuilder::new()
        .define_str(ADMIN, draft(ADMIN_FLAGS)?)?
        .define_str(GUEST, draft(GUEST_FLAGS)?)
}

/// Returns the process-wide built-in registry, freezing it on first use.
///
/// # Errors
///
/// Returns [`AuthError`] only if the built-in table is malformed.
pub fn registry() -> Result<&'static RoleRegistry, AuthError> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let built = builtin_roles()?.freeze();
    Ok(REGISTRY.get_or_init(|| built))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolebook_auth::PermissionSet;

    #[test]
    fn builtin_roles_in_order() {
        let registry = registry().expect("builtin roles");
        let ids: Vec<&str> = registry.role_ids().map(|r| r.as_str()).collect();
        assert_eq!(ids, vec![ADMIN, GUEST]);
    }

    #[test]
    fn registry_is_process_wide() {
        let a = registry().expect("builtin roles");
        let b = registry().expect("builtin roles");
        assert!(std::ptr::eq(a, b));
        assert!(PermissionSet::ptr_eq(
            a.lookup(GUEST).expect("guest"),
            b.lookup(GUEST).expect("guest"),
        ));
    }

    #[test]
    fn admin_grants_everything() {
        let admin = registry().expect("builtin roles").lookup(ADMIN).expect("admin");
        let granted: Vec<&str> = admin.granted().map(|c| c.as_str()).collect();
        assert_eq!(granted, vec!["login", "add", "del", "query"]);
    }

    #[test]
    fn guest_grants_login_and_query() {
        let guest = registry().expect("builtin roles").lookup(GUEST).expect("guest");
        let granted: Vec<&str> = guest.granted().map(|c| c.as_str()).collect();
        assert_eq!(granted, vec!["login", "query"]);
        assert_eq!(guest.get("del"), Some(false));
    }
}
