//! Core types for Rolebook.
//!
//! Foundational identifier and identity types shared by every other
//! Rolebook crate.
//!
//! # Crate Architecture
//!
//! ```text
//! rolebook-types    : RoleId, CapabilityName, Subject, ErrorCode  ◄── HERE
//!       ↑
//! rolebook-auth     : PermissionSet, RoleRegistry, PermissionView
//!       ↑
//! rolebook-runtime  : config, built-in role table, reporting
//!       ↑
//! rolebook-cli      : command-line interface
//! ```
//!
//! # Example
//!
//! ```
//! use rolebook_types::{CapabilityName, RoleId, Subject, TryNew};
//!
//! let role = RoleId::try_new("guest".to_string()).expect("valid role id");
//! let cap = CapabilityName::try_new("query".to_string()).expect("valid capability");
//! let subject = Subject::new("Kante").with_attr("age", 26);
//!
//! assert_eq!(role, "guest");
//! assert_eq!(cap, "query");
//! assert_eq!(subject.name(), "Kante");
//! ```

mod construct;
mod error;
mod id;
mod subject;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{CapabilityName, IdError, RoleId, SubjectId, MAX_IDENTIFIER_LEN};
pub use subject::Subject;
