//! Subject (user identity) type.
//!
//! A [`Subject`] is the entity a permission set is bound to. It carries
//! identity only; what the subject may do is decided by the role it is
//! bound to, never by its attributes.

use crate::SubjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a user or other entity.
///
/// Attributes are opaque to the permission model and are carried only
/// for reporting.
///
/// # Example
///
/// ```
/// use rolebook_types::Subject;
///
/// let kante = Subject::new("Kante")
///     .with_attr("age", 26)
///     .with_attr("sex", "male");
///
/// assert_eq!(kante.name(), "Kante");
/// assert_eq!(kante.attr("age"), Some("26"));
/// assert_eq!(kante.attr("email"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

impl Subject {
    /// Creates a subject with a fresh [`SubjectId`] and no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubjectId::new(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(key.into(), value.to_string());
        self
    }

    /// Returns the subject id.
    #[must_use]
    pub fn id(&self) -> SubjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Iterates attributes in key order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
