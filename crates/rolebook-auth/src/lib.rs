//! Immutable role-based permission model for Rolebook.
//!
//! # Model
//!
//! ```text
//! RoleRegistry (frozen)
//! ├── Role "admin" ── PermissionSet { login, add, del, query }
//! └── Role "guest" ── PermissionSet { login, query, add: false, del: false }
//!          │
//!          │ lookup("guest")
//!          ▼
//! PermissionView::bind(subject, set, BindMode) ──► report() ──► ["login", "query"]
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`PermissionDraft`] / [`PermissionSet`] | mutable draft / frozen capability flags |
//! | [`RoleRegistryBuilder`] / [`RoleRegistry`] | role table before / after freezing |
//! | [`Freeze`] | post-order build-then-seal, idempotent |
//! | [`PermissionView`] | subject + permission set, reporting only |
//! | [`AuthError`] | unknown role, duplicate role, immutable write |
//!
//! # Design Principles
//!
//! - **Immutable after freeze** — frozen types expose no mutation API; write
//!   attempts fail with [`AuthError::ImmutableWriteViolation`]
//! - **Views are not reassignable** — a view's permission set is fixed at bind
//! - **Reporting, not enforcement** — nothing here blocks an action
//!
//! # Example
//!
//! ```
//! use rolebook_auth::{BindMode, Freeze, PermissionDraft, PermissionView, RoleRegistryBuilder};
//! use rolebook_types::Subject;
//!
//! let registry = RoleRegistryBuilder::new()
//!     .define_str("guest", PermissionDraft::new().with("login", true)?.with("del", false)?)?
//!     .freeze();
//!
//! let view = PermissionView::bind(
//!     Subject::new("Kante"),
//!     registry.lookup("guest")?,
//!     BindMode::Shared,
//! );
//!
//! assert!(view.try_set_flag("del", true).is_err());
//! assert_eq!(view.granted_names(), vec!["login"]);
//! # Ok::<(), rolebook_auth::AuthError>(())
//! ```

pub mod error;
pub mod freeze;
pub mod permission;
pub mod registry;
pub mod role;
pub mod view;

pub use error::{AuthError, WriteOp, WriteTarget};
pub use freeze::{freeze_all, Freeze};
pub use permission::{Grant, Granted, PermissionDraft, PermissionSet};
pub use registry::{RoleRegistry, RoleRegistryBuilder};
pub use role::{Role, RoleDraft};
pub use view::{report, BindMode, PermissionView};
