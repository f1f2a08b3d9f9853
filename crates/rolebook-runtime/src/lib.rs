//! Runtime layer for Rolebook.
//!
//! Wires the permission model in `rolebook-auth` to the outside world:
//!
//! - [`config`] — layered TOML configuration, including the role table
//! - [`builtin`] — the default admin/guest table, frozen once per process
//! - [`report`] — text and JSON rendering of views and role tables
//! - [`scenario`] — tampering attempts and the demo walkthrough
//!
//! # Example
//!
//! ```
//! use rolebook_auth::PermissionView;
//! use rolebook_runtime::config::{ReportFormat, RolebookConfig};
//! use rolebook_runtime::report::render_view;
//! use rolebook_types::Subject;
//!
//! let config = RolebookConfig::default();
//! let registry = config.registry()?;
//! let view = PermissionView::bind_role(
//!     Subject::new("Kante"),
//!     registry.lookup_role("guest")?,
//!     config.bind.mode,
//! );
//!
//! let text = render_view(&view, ReportFormat::Text)?;
//! assert_eq!(text, "user Kante has permission: login\nuser Kante has permission: query");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builtin;
pub mod config;
pub mod report;
pub mod scenario;

pub use config::{ConfigError, ConfigLoader, ConfigResolver, RolebookConfig};
