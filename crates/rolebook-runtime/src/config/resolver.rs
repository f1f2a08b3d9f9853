//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  RolebookConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     RolebookConfig (final)
//! ```

use super::RolebookConfig;

/// Applies overrides (typically CLI flags) on top of a loaded config.
///
/// Only values the caller actually set should be applied, preserving
/// loaded values for everything else.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    fn apply(&self, config: &mut RolebookConfig);
}
