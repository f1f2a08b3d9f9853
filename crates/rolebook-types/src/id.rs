//! Identifier types.
//!
//! [`RoleId`] and [`CapabilityName`] are validated string identifiers.
//! [`SubjectId`] is a random UUID assigned to every subject.

use crate::{ErrorCode, TryNew};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Identifier validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier kind was being built.
        kind: &'static str,
    },

    /// The identifier exceeded [`MAX_IDENTIFIER_LEN`].
    #[error("{kind} '{value}' is longer than {max} bytes", max = MAX_IDENTIFIER_LEN)]
    TooLong {
        /// Which identifier kind was being built.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The identifier contained a character outside `[A-Za-z0-9_.-]`.
    #[error("{kind} '{value}' contains invalid character {ch:?}")]
    InvalidChar {
        /// Which identifier kind was being built.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// The first offending character.
        ch: char,
    },
}

impl ErrorCode for IdError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "ID_EMPTY",
            Self::TooLong { .. } => "ID_TOO_LONG",
            Self::InvalidChar { .. } => "ID_INVALID_CHAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

fn validate(kind: &'static str, value: String) -> Result<String, IdError> {
    if value.is_empty() {
        return Err(IdError::Empty { kind });
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(IdError::TooLong { kind, value });
    }
    if let Some(ch) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(IdError::InvalidChar { kind, value, ch });
    }
    Ok(value)
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryNew for $name {
            type Error = IdError;
            type Args = String;

            fn try_new(value: String) -> Result<Self, IdError> {
                validate($kind, value).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, IdError> {
                Self::try_new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = IdError;

            fn try_from(value: &str) -> Result<Self, IdError> {
                Self::try_new(value.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, IdError> {
                Self::try_new(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_identifier!(
    /// Identifier of a role in the registry (e.g. `admin`, `guest`).
    ///
    /// # Example
    ///
    /// ```
    /// use rolebook_types::RoleId;
    ///
    /// let admin: RoleId = "admin".parse().expect("valid role id");
    /// assert_eq!(admin, "admin");
    /// assert!("super admin".parse::<RoleId>().is_err());
    /// ```
    RoleId,
    "role id"
);

string_identifier!(
    /// Name of a capability inside a permission set (e.g. `login`, `del`).
    ///
    /// # Example
    ///
    /// ```
    /// use rolebook_types::CapabilityName;
    ///
    /// let del = CapabilityName::try_from("del").expect("valid capability");
    /// assert_eq!(del.as_str(), "del");
    /// ```
    CapabilityName,
    "capability name"
);

/// Unique identifier of a [`Subject`](crate::Subject).
///
/// Random UUID v4; two subjects with identical attributes still have
/// distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Creates a new random subject id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_error_codes;

    #[test]
    fn role_id_accepts_plain_names() {
        for name in ["admin", "guest", "read-only", "ops.oncall", "tier_2"] {
            let id = RoleId::try_new(name.to_string()).expect("valid role id");
            assert_eq!(id.as_str(), name);
        }
    }

    #[test]
    fn empty_identifier_rejected() {
        let err = RoleId::try_new(String::new()).expect_err("empty must fail");
        assert_eq!(err, IdError::Empty { kind: "role id" });
        assert_eq!(err.code(), "ID_EMPTY");
    }

    #[test]
    fn long_identifier_rejected() {
        let value = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        let err = CapabilityName::try_new(value).expect_err("too long must fail");
        assert!(matches!(err, IdError::TooLong { .. }));
    }

    #[test]
    fn invalid_char_reports_first_offender() {
        let err = CapabilityName::try_from("del all").expect_err("space must fail");
        match err {
            IdError::InvalidChar { ch, kind, .. } => {
                assert_eq!(ch, ' ');
                assert_eq!(kind, "capability name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: RoleId = serde_json::from_str("\"guest\"").expect("deserialize");
        assert_eq!(ok, "guest");
        assert_eq!(serde_json::to_string(&ok).expect("serialize"), "\"guest\"");

        let bad = serde_json::from_str::<RoleId>("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn subject_ids_are_unique() {
        assert_ne!(SubjectId::new(), SubjectId::new());
    }

    #[test]
    fn error_codes_follow_convention() {
        assert_error_codes(
            &[
                IdError::Empty { kind: "role id" },
                IdError::TooLong {
                    kind: "role id",
                    value: String::new(),
                },
                IdError::InvalidChar {
                    kind: "role id",
                    value: String::new(),
                    ch: ' ',
                },
            ],
            "ID_",
        );
    }
}
