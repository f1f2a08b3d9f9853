//! Permission sets.
//!
//! A permission set maps capability names to boolean grant flags.
//! It exists in two stages:
//!
//! ```text
//! PermissionDraft ──freeze()──► PermissionSet
//!   (mutable, owned)              (immutable, Arc-shared)
//! ```
//!
//! [`PermissionSet`] exposes no mutation API. The `try_*` write methods
//! exist so callers attempting to tamper with a frozen set get an explicit
//! [`AuthError::ImmutableWriteViolation`] instead of silent success.

use crate::error::{AuthError, WriteOp, WriteTarget};
use rolebook_types::{CapabilityName, IdError, TryNew};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// One capability entry: name plus grant flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grant {
    capability: CapabilityName,
    granted: bool,
}

impl Grant {
    /// The capability name.
    #[must_use]
    pub fn capability(&self) -> &CapabilityName {
        &self.capability
    }

    /// Whether the capability is granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Mutable permission set under construction.
///
/// Assigning an existing key updates its flag in place; the key keeps
/// its original position.
///
/// # Example
///
/// ```
/// use rolebook_auth::{Freeze, PermissionDraft};
///
/// let mut draft = PermissionDraft::new();
/// draft.try_set("login", true)?.try_set("add", false)?;
/// draft.try_set("login", false)?;
///
/// let set = draft.freeze();
/// assert_eq!(set.get("login"), Some(false));
/// assert_eq!(set.len(), 2);
/// # Ok::<(), rolebook_types::IdError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionDraft {
    entries: Vec<Grant>,
}

impl PermissionDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag, inserting the capability if it is new.
    pub fn set(&mut self, capability: CapabilityName, granted: bool) -> &mut Self {
        match self
            .entries
            .iter_mut()
            .find(|g| g.capability == capability)
        {
            Some(existing) => existing.granted = granted,
            None => self.entries.push(Grant {
                capability,
                granted,
            }),
        }
        self
    }

    /// Validates `capability` and sets its flag.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if `capability` is not a valid capability name.
    pub fn try_set(&mut self, capability: &str, granted: bool) -> Result<&mut Self, IdError> {
        let name = CapabilityName::try_new(capability.to_string())?;
        Ok(self.set(name, granted))
    }

    /// Builder-style [`try_set`](Self::try_set).
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if `capability` is not a valid capability name.
    pub fn with(mut self, capability: &str, granted: bool) -> Result<Self, IdError> {
        self.try_set(capability, granted)?;
        Ok(self)
    }

    /// Removes a capability, returning its flag if it was present.
    pub fn remove(&mut self, capability: &str) -> Option<bool> {
        let pos = self
            .entries
            .iter()
            .position(|g| g.capability.as_str() == capability)?;
        Some(self.entries.remove(pos).granted)
    }

    /// Number of capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the draft has no capabilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<Grant> {
        self.entries
    }
}

impl FromIterator<(CapabilityName, bool)> for PermissionDraft {
    fn from_iter<I: IntoIterator<Item = (CapabilityName, bool)>>(iter: I) -> Self {
        let mut draft = Self::new();
        for (capability, granted) in iter {
            draft.set(capability, granted);
        }
        draft
    }
}

/// Immutable, ordered mapping from capability name to grant flag.
///
/// Cloning is cheap and yields a handle to the *same* entries
/// ([`ptr_eq`](Self::ptr_eq) holds). Use [`deep_copy`](Self::deep_copy)
/// for an independent duplicate.
#[derive(Clone)]
pub struct PermissionSet {
    entries: Arc<[Grant]>,
}

impl PermissionSet {
    pub(crate) fn from_entries(entries: Vec<Grant>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Returns the flag for `capability`, or `None` if the key is absent.
    #[must_use]
    pub fn get(&self, capability: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|g| g.capability.as_str() == capability)
            .map(|g| g.granted)
    }

    /// Returns `true` only if `capability` is present and granted.
    #[must_use]
    pub fn is_granted(&self, capability: &str) -> bool {
        self.get(capability).unwrap_or(false)
    }

    /// Returns `true` if `capability` is a key of this set.
    #[must_use]
    pub fn contains(&self, capability: &str) -> bool {
        self.get(capability).is_some()
    }

    /// Number of capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no capabilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates all entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grant> {
        self.entries.iter()
    }

    /// Iterates the names of granted capabilities in insertion order.
    ///
    /// The iterator is lazy and can be cloned to restart the scan.
    #[must_use]
    pub fn granted(&self) -> Granted<'_> {
        Granted {
            inner: self.entries.iter(),
        }
    }

    /// Returns `true` if both handles point at the same entries.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }

    /// Creates an independent, equally frozen duplicate.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        Self::from_entries(self.entries.to_vec())
    }

    /// Always fails: flags of a frozen set cannot change.
    ///
    /// # Errors
    ///
    /// Always returns [`AuthError::ImmutableWriteViolation`]. An absent key
    /// is reported as an attempted insert.
    pub fn try_set(&self, capability: &str, granted: bool) -> Result<(), AuthError> {
        let operation = if self.contains(capability) {
            WriteOp::Set
        } else {
            WriteOp::Insert
        };
        tracing::warn!(
            capability,
            attempted = granted,
            current = ?self.get(capability),
            op = %operation,
            "write rejected: permission set is frozen"
        );
        Err(AuthError::immutable_write(
            WriteTarget::PermissionSet,
            operation,
            Some(capability),
        ))
    }

    /// Always fails: keys cannot be added to a frozen set.
    ///
    /// # Errors
    ///
    /// Always returns [`AuthError::ImmutableWriteViolation`].
    pub fn try_insert(&self, capability: &str, granted: bool) -> Result<(), AuthError> {
        tracing::warn!(
            capability,
            attempted = granted,
            "insert rejected: permission set is frozen"
        );
        Err(AuthError::immutable_write(
            WriteTarget::PermissionSet,
            WriteOp::Insert,
            Some(capability),
        ))
    }

    /// Always fails: keys cannot be removed from a frozen set.
    ///
    /// # Errors
    ///
    /// Always returns [`AuthError::ImmutableWriteViolation`].
    pub fn try_remove(&self, capability: &str) -> Result<bool, AuthError> {
        tracing::warn!(capability, "remove rejected: permission set is frozen");
        Err(AuthError::immutable_write(
            WriteTarget::PermissionSet,
            WriteOp::Remove,
            Some(capability),
        ))
    }
}

impl PartialEq for PermissionSet {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.entries == other.entries
    }
}

impl Eq for PermissionSet {}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|g| (g.capability.as_str(), g.granted)))
            .finish()
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for g in self.entries.iter() {
            map.serialize_entry(g.capability.as_str(), &g.granted)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Grant;
    type IntoIter = std::slice::Iter<'a, Grant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over granted capability names.
#[derive(Debug, Clone)]
pub struct Granted<'a> {
    inner: std::slice::Iter<'a, Grant>,
}

impl<'a> Iterator for Granted<'a> {
    type Item = &'a CapabilityName;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|g| g.granted)
            .map(|g| &g.capability)
    }
}

impl FusedIterator for Granted<'_> {}
