//! Error types for the bridge harness.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use bridge_harness::{Result, Error};
//!
//! async fn example(page: &FeaturePage) -> Result<()> {
//!     page.enabled().await?;
//!     page.navigates_to("form.html").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::UnsupportedVariant`], [`Error::UnresolvedPlaceholders`] |
//! | Synchronization | [`Error::WaitTimeout`] |
//! | Fixtures | [`Error::Parse`] |
//! | Assertions | [`Error::Assertion`] |
//! | Page | [`Error::Page`] |
//! | External | [`Error::Io`], [`Error::Json`] |
//!
//! The harness performs no local recovery: every error bubbles directly to
//! the enclosing test and fails it, carrying the method names and counts
//! involved so the cause is diagnosable without reading harness internals.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when harness configuration is invalid at setup time.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Unsupported build variant name.
    ///
    /// Returned when test metadata names a build/platform combination the
    /// harness does not support.
    #[error("Unsupported build variant: {name}")]
    UnsupportedVariant {
        /// The unrecognized variant name.
        name: String,
    },

    /// Placeholder tokens left unresolved after substitution.
    ///
    /// Returned when the built artifact contains placeholder keys that the
    /// substitution set does not provide. Surfaces at setup time so a
    /// missing substitution never becomes a silent no-op.
    #[error("Unresolved placeholders in artifact: {}", names.join(", "))]
    UnresolvedPlaceholders {
        /// The placeholder tokens still present in the script.
        names: Vec<String>,
    },

    // ========================================================================
    // Synchronization Errors
    // ========================================================================
    /// A wait did not reach its expected call count in time.
    #[error(
        "Timed out after {timeout_ms}ms waiting for {expected} call(s) to '{method}' (observed {observed})"
    )]
    WaitTimeout {
        /// Method name the wait was filtering on.
        method: String,
        /// Call count the wait required.
        expected: usize,
        /// Call count observed on the final poll.
        observed: usize,
        /// Milliseconds waited before timing out.
        timeout_ms: u64,
    },

    // ========================================================================
    // Fixture Errors
    // ========================================================================
    /// Malformed fixture JSON.
    #[error("Failed to parse fixture {path}: {message}")]
    Parse {
        /// Path of the fixture file.
        path: PathBuf,
        /// Underlying parse failure.
        message: String,
    },

    // ========================================================================
    // Assertion Errors
    // ========================================================================
    /// Observed message or shape differs from expectation.
    ///
    /// Owned by the assertion helpers on the page facade, not by the
    /// harness core.
    #[error("Assertion mismatch: {message}")]
    Assertion {
        /// Description of the mismatch.
        message: String,
    },

    // ========================================================================
    // Page Errors
    // ========================================================================
    /// A page operation failed on the automation-driver side.
    ///
    /// Returned when navigation, init-script registration, or an evaluate
    /// round trip fails.
    #[error("Page error: {message}")]
    Page {
        /// Description of the page failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an unsupported variant error.
    #[inline]
    pub fn unsupported_variant(name: impl Into<String>) -> Self {
        Self::UnsupportedVariant { name: name.into() }
    }

    /// Creates an unresolved placeholders error.
    #[inline]
    pub fn unresolved_placeholders(names: Vec<String>) -> Self {
        Self::UnresolvedPlaceholders { names }
    }

    /// Creates a wait timeout error.
    #[inline]
    pub fn wait_timeout(
        method: impl Into<String>,
        expected: usize,
        observed: usize,
        timeout_ms: u64,
    ) -> Self {
        Self::WaitTimeout {
            method: method.into(),
            expected,
            observed,
            timeout_ms,
        }
    }

    /// Creates a fixture parse error.
    #[inline]
    pub fn parse(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates an assertion mismatch error.
    #[inline]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Creates a page error.
    #[inline]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::UnsupportedVariant { .. }
                | Self::UnresolvedPlaceholders { .. }
        )
    }

    /// Returns `true` if this is an assertion mismatch.
    #[inline]
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::config("artifact source is empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: artifact source is empty"
        );
    }

    #[test]
    fn test_wait_timeout_display_carries_diagnosis() {
        let err = Error::wait_timeout("ready", 1, 0, 5000);
        let text = err.to_string();
        assert!(text.contains("ready"));
        assert!(text.contains("5000ms"));
        assert!(text.contains("observed 0"));
    }

    #[test]
    fn test_unresolved_placeholders_display() {
        let err = Error::unresolved_placeholders(vec![
            "$CONTENT_SCOPE$".to_string(),
            "$USER_PREFERENCES$".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Unresolved placeholders in artifact: $CONTENT_SCOPE$, $USER_PREFERENCES$"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::wait_timeout("ready", 1, 0, 5000);
        let other_err = Error::config("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_config() {
        assert!(Error::config("test").is_config());
        assert!(Error::unsupported_variant("android").is_config());
        assert!(Error::unresolved_placeholders(vec!["$X$".into()]).is_config());
        assert!(!Error::assertion("test").is_config());
    }

    #[test]
    fn test_is_assertion() {
        assert!(Error::assertion("shape mismatch").is_assertion());
        assert!(!Error::page("evaluate failed").is_assertion());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
