//! Placeholder substitution for built artifacts.
//!
//! Build artifacts carry `$NAME$` placeholder tokens for configuration that
//! is only known at test time. The substitution set covers a fixed key set;
//! each value is JSON-encoded into the script. Any placeholder-shaped token
//! still present after substitution fails the setup: a missing substitution
//! must never become a silent no-op.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder for the content-scope feature configuration.
pub const CONTENT_SCOPE_PLACEHOLDER: &str = "$CONTENT_SCOPE$";

/// Placeholder for the user's unprotected-domain list.
pub const USER_UNPROTECTED_DOMAINS_PLACEHOLDER: &str = "$USER_UNPROTECTED_DOMAINS$";

/// Placeholder for the user preference blob.
pub const USER_PREFERENCES_PLACEHOLDER: &str = "$USER_PREFERENCES$";

/// Matches any placeholder-shaped token: `$NAME$` in SCREAMING_SNAKE_CASE.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z][A-Z0-9_]*\$").expect("valid placeholder pattern"));

// ============================================================================
// Substitutions
// ============================================================================

/// The fixed substitution set rendered into a build artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitutions {
    /// Content-scope feature configuration.
    #[serde(rename = "contentScope")]
    pub content_scope: Value,

    /// Domains the user has excluded from protections.
    #[serde(rename = "userUnprotectedDomains")]
    pub user_unprotected_domains: Vec<String>,

    /// User preference blob (platform name, debug flag).
    #[serde(rename = "userPreferences")]
    pub user_preferences: Value,
}

impl Substitutions {
    /// Creates a substitution set.
    #[inline]
    #[must_use]
    pub fn new(
        content_scope: Value,
        user_unprotected_domains: Vec<String>,
        user_preferences: Value,
    ) -> Self {
        Self {
            content_scope,
            user_unprotected_domains,
            user_preferences,
        }
    }

    /// Substitutes the fixed placeholders in `artifact`.
    ///
    /// Each value is JSON-encoded, so the result is a valid script
    /// expression wherever the placeholder appeared.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedPlaceholders`] if any placeholder-shaped token
    ///   remains after substitution
    /// - [`Error::Json`] if a value cannot be encoded
    pub fn apply(&self, artifact: &str) -> Result<String> {
        let resolved = artifact
            .replace(
                CONTENT_SCOPE_PLACEHOLDER,
                &serde_json::to_string(&self.content_scope)?,
            )
            .replace(
                USER_UNPROTECTED_DOMAINS_PLACEHOLDER,
                &serde_json::to_string(&self.user_unprotected_domains)?,
            )
            .replace(
                USER_PREFERENCES_PLACEHOLDER,
                &serde_json::to_string(&self.user_preferences)?,
            );

        let mut unresolved: Vec<String> = PLACEHOLDER_RE
            .find_iter(&resolved)
            .map(|m| m.as_str().to_string())
            .collect();
        unresolved.sort();
        unresolved.dedup();

        if unresolved.is_empty() {
            Ok(resolved)
        } else {
            Err(Error::unresolved_placeholders(unresolved))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
