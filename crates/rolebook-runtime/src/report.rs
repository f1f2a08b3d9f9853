//! Report rendering.
//!
//! Turns [`PermissionView::report`] into text lines or JSON documents.
//! The auth layer only yields capability names; formatting lives here.

use crate::config::ReportFormat;
use rolebook_auth::{BindMode, PermissionSet, PermissionView, RoleRegistry};
use rolebook_types::SubjectId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Formats one granted capability as a text line.
#[must_use]
pub fn permission_line(subject: &str, capability: &str) -> String {
    format!("user {subject} has permission: {capability}")
}

/// Lazily yields one text line per granted capability.
pub fn text_lines(view: &PermissionView) -> impl Iterator<Item = String> + '_ {
    let name = view.subject().name();
    view.report().map(move |cap| permission_line(name, cap.as_str()))
}

/// Serializable snapshot of a view's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewReport {
    /// Subject display name.
    pub subject: String,
    /// Subject id.
    pub subject_id: SubjectId,
    /// Subject attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Role the view was bound from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Binding mode.
    pub mode: BindMode,
    /// Granted capabilities in insertion order.
    pub granted: Vec<String>,
}

impl From<&PermissionView> for ViewReport {
    fn from(view: &PermissionView) -> Self {
        let subject = view.subject();
        Self {
            subject: subject.name().to_string(),
            subject_id: subject.id(),
            attributes: subject
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            role: view.role().map(ToString::to_string),
            mode: view.mode(),
            granted: view.granted_names(),
        }
    }
}

/// Renders a view in the requested format.
///
/// Text output has no trailing newline; an empty report renders as an
/// empty string.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if JSON serialization fails.
pub fn render_view(
    view: &PermissionView,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(text_lines(view).collect::<Vec<_>>().join("\n")),
        ReportFormat::Json => serde_json::to_string_pretty(&ViewReport::from(view)),
    }
}

#[derive(Serialize)]
struct RoleEntry<'a> {
    role: &'a str,
    permission: &'a PermissionSet,
}

/// Renders every role and its flags.
///
/// Text format: `admin: login=true add=true del=true query=true`.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if JSON serialization fails.
pub fn render_roles(
    registry: &RoleRegistry,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(registry
            .roles()
            .map(|role| {
                let flags: Vec<String> = role
                    .permission()
                    .iter()
                    .map(|g| format!("{}={}", g.capability(), g.is_granted()))
                    .collect();
                format!("{}: {}", role.id(), flags.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")),
        ReportFormat::Json => {
            let entries: Vec<RoleEntry<'_>> = registry
                .roles()
                .map(|role| RoleEntry {
                    role: role.id().as_str(),
                    permission: role.permission(),
                })
                .collect();
            serde_json::to_string_pretty(&entries)
        }
    }
}
