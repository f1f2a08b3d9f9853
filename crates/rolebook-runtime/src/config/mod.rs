//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────────┐
//! │  1. CLI flags (ConfigResolver)               │
//! ├──────────────────────────────────────────────┤
//! │  2. Environment Variables (ROLEBOOK_*)       │
//! ├──────────────────────────────────────────────┤
//! │  3. Project Config (.rolebook/config.toml)   │
//! ├──────────────────────────────────────────────┤
//! │  4. Global Config (~/.rolebook/config.toml)  │
//! ├──────────────────────────────────────────────┤
//! │  5. Default Values (built-in roles)          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `ROLEBOOK_DEBUG` | `debug` | bool |
//! | `ROLEBOOK_BIND_MODE` | `bind.mode` | `shared` / `copy` |
//! | `ROLEBOOK_REPORT_FORMAT` | `report.format` | `text` / `json` |
//! | `ROLEBOOK_LOG_LEVEL` | `logging.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [bind]
//! mode = "shared"
//!
//! [report]
//! format = "text"
//!
//! [logging]
//! level = "warn"
//!
//! [roles.admin.permission]
//! login = true
//! add = true
//! del = true
//! query = true
//!
//! [roles.guest.permission]
//! login = true
//! add = false
//! del = false
//! query = true
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{
    BindConfig, BindLayer, ConfigLayer, LoggingConfig, LoggingLayer, ReportConfig, ReportFormat,
    ReportLayer, RoleTable, RolebookConfig,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".rolebook")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".rolebook";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
