//! Unified error code interface for Rolebook.
//!
//! All Rolebook error types implement [`ErrorCode`] to provide
//! machine-readable codes and recoverability information.
//!
//! # Example
//!
//! ```
//! use rolebook_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     Missing(String),
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "LOOKUP_MISSING",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let err = LookupError::Missing("admin".into());
//! assert_eq!(err.code(), "LOOKUP_MISSING");
//! ```

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g., `"AUTH_UNKNOWN_ROLE"`
/// - **Namespace-prefixed**: `"AUTH_"`, `"CONFIG_"`, `"ID_"`
/// - **Stable**: codes are part of the API contract
///
/// # Recoverability
///
/// An error is recoverable when the caller can take corrective action
/// (pick another role, fix an input). Tampering attempts and programming
/// errors are never recoverable.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the caller can correct the condition and try again.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows Rolebook conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE. Intended for tests.
///
/// # Example
///
/// ```
/// use rolebook_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// enum MyError { Timeout }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&MyError::Timeout, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Validates every error in `errors` with [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum ProbeError {
        Fixable,
        Fatal,
    }

    impl ErrorCode for ProbeError {
        fn code(&self) -> &'static str {
            match self {
                Self::Fixable => "PROBE_FIXABLE",
                Self::Fatal => "PROBE_FATAL",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Fixable)
        }
    }

    #[test]
    fn code_and_recoverability() {
        assert_eq!(ProbeError::Fixable.code(), "PROBE_FIXABLE");
        assert!(ProbeError::Fixable.is_recoverable());
        assert!(!ProbeError::Fatal.is_recoverable());
    }

    #[test]
    fn all_variants_pass_convention() {
        assert_error_codes(&[ProbeError::Fixable, ProbeError::Fatal], "PROBE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn wrong_prefix_panics() {
        assert_error_code(&ProbeError::Fatal, "AUTH_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("AUTH_UNKNOWN_ROLE"));
        assert!(is_upper_snake_case("E2"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("auth_role"));
        assert!(!is_upper_snake_case("_AUTH"));
        assert!(!is_upper_snake_case("AUTH_"));
        assert!(!is_upper_snake_case("AUTH__ROLE"));
    }
}
