//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use rolebook_auth::{BindMode, PermissionDraft, RoleRegistry, RoleRegistryBuilder};
use rolebook_auth::Freeze;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use rolebook_runtime::config::RolebookConfig;
///
/// let config = RolebookConfig::default();
/// assert!(!config.debug);
/// assert!(config.roles.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RolebookConfig {
    /// Debug mode.
    pub debug: bool,

    /// How views take ownership of permission sets.
    pub bind: BindConfig,

    /// Report output settings.
    pub report: ReportConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Role table. `None` means the built-in admin/guest table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleTable>,
}

impl RolebookConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Applies one config layer on top of this config.
    ///
    /// Every field the layer sets wins, including values equal to the
    /// default. A `roles` table in the layer replaces the current table
    /// wholesale; role tables are never merged flag by flag.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }
        if let Some(mode) = layer.bind.mode {
            self.bind.mode = mode;
        }
        if let Some(format) = layer.report.format {
            self.report.format = format;
        }
        if let Some(ref level) = layer.logging.level {
            self.logging.level.clone_from(level);
        }
        if layer.roles.is_some() {
            self.roles.clone_from(&layer.roles);
        }
    }

    /// Builds and freezes the configured role registry.
    ///
    /// Falls back to the built-in table when no `[roles]` are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the role table is malformed.
    pub fn registry(&self) -> Result<RoleRegistry, ConfigError> {
        match self.roles {
            Some(ref table) => Ok(table.to_builder()?.freeze()),
            None => Ok(crate::builtin::registry()?.clone()),
        }
    }
}

/// Binding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BindConfig {
    /// `shared` (default) or `copy`.
    pub mode: BindMode,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One `user <name> has permission: <cap>` line per capability.
    #[default]
    Text,
    /// A JSON document per view.
    Json,
}

impl ReportFormat {
    /// Parses a format name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: ReportFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default terminal log level when neither `RUST_LOG` nor CLI flags
    /// select one.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

/// One config file as written, before it is applied.
///
/// Unlike [`RolebookConfig`], every field is optional: `None` means the
/// file did not mention it and the lower layer's value stays.
///
/// # Example
///
/// ```
/// use rolebook_auth::BindMode;
/// use rolebook_runtime::config::{ConfigLayer, RolebookConfig};
///
/// let mut config = RolebookConfig::default();
/// config.bind.mode = BindMode::Copy;
///
/// let layer = ConfigLayer::from_toml("[bind]\nmode = \"shared\"\n")?;
/// config.merge(&layer);
/// assert_eq!(config.bind.mode, BindMode::Shared);
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    /// Debug mode.
    pub debug: Option<bool>,
    /// `[bind]` section.
    pub bind: BindLayer,
    /// `[report]` section.
    pub report: ReportLayer,
    /// `[logging]` section.
    pub logging: LoggingLayer,
    /// `[roles]` table.
    pub roles: Option<RoleTable>,
}

impl ConfigLayer {
    /// Deserializes a layer from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// `[bind]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BindLayer {
    /// `shared` or `copy`.
    pub mode: Option<BindMode>,
}

/// `[report]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportLayer {
    /// `text` or `json`.
    pub format: Option<ReportFormat>,
}

/// `[logging]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingLayer {
    /// Log level directive.
    pub level: Option<String>,
}

/// Role table as written in TOML.
///
/// ```toml
/// [roles.admin.permission]
/// login = true
/// del = true
///
/// [roles.guest.permission]
/// login = true
/// del = false
/// ```
///
/// Role and capability order follow the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RoleTable(toml::Table);

impl RoleTable {
    /// Number of roles in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validates the table and defines every role on a builder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoleTable`] for malformed entries and
    /// [`ConfigError::Registry`] for invalid ids or duplicates.
    pub fn to_builder(&self) -> Result<RoleRegistryBuilder, ConfigError> {
        let mut builder = RoleRegistryBuilder::new();

        for (role, value) in &self.0 {
            let permission = value
                .as_table()
                .and_then(|entry| entry.get("permission"))
                .and_then(toml::Value::as_table)
                .ok_or_else(|| {
                    ConfigError::invalid_role(role, "expected a [roles.<id>.permission] table")
                })?;

            let mut draft = PermissionDraft::new();
            for (capability, flag) in permission {
                let granted = flag.as_bool().ok_or_else(|| {
                    ConfigError::invalid_role(
                        role,
                        format!("capability '{capability}' must be a boolean"),
                    )
                })?;
                draft
                    .try_set(capability, granted)
                    .map_err(rolebook_auth::AuthError::from)?;
            }

            builder = builder.define_str(role, draft)?;
        }

        Ok(builder)
    }
}
