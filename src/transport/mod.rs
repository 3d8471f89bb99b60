//! Transport adapters for the platform build variants.
//!
//! Each build of the content-script artifact targets one platform flavor and
//! needs a distinct wrapping and mock-messaging strategy before it can be
//! attached to a test page. This module renders both: the injectable feature
//! script (placeholder substitution + variant wrapping) and the mock
//! native-host shim a raw-script driver would install.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `substitute` | Fixed-placeholder substitution engine |
//! | `webkit` | apple-isolated wrapping and messaging shim |
//! | `windows` | windows wrapping and messaging shim |

// ============================================================================
// Submodules
// ============================================================================

mod substitute;
mod webkit;
mod windows;

// ============================================================================
// Re-exports
// ============================================================================

pub use substitute::{
    CONTENT_SCOPE_PLACEHOLDER, Substitutions, USER_PREFERENCES_PLACEHOLDER,
    USER_UNPROTECTED_DOMAINS_PLACEHOLDER,
};

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::harness::MockHostInstall;

// ============================================================================
// BuildVariant
// ============================================================================

/// Target platform flavor of the content-script bundle.
///
/// A closed set: every variant is handled exhaustively, and the choice is
/// made once at adapter construction rather than re-dispatched per call.
/// Unknown names fail in [`BuildVariant::from_name`] with a configuration
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildVariant {
    /// WebKit isolated-world build.
    AppleIsolated,
    /// Windows WebView2 build.
    Windows,
}

impl BuildVariant {
    /// All supported variants.
    pub const ALL: [BuildVariant; 2] = [BuildVariant::AppleIsolated, BuildVariant::Windows];

    /// Resolves a variant from its build name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVariant`] for any name outside the
    /// supported set.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "apple-isolated" => Ok(Self::AppleIsolated),
            "windows" => Ok(Self::Windows),
            other => Err(Error::unsupported_variant(other)),
        }
    }

    /// Returns the build name of this variant.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AppleIsolated => "apple-isolated",
            Self::Windows => "windows",
        }
    }

    /// Returns the page-world context name messages from this build carry.
    #[inline]
    #[must_use]
    pub const fn page_context_name(self) -> &'static str {
        match self {
            Self::AppleIsolated => "contentScopeScriptsIsolated",
            Self::Windows => "contentScopeScripts",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

// ============================================================================
// InjectableScript
// ============================================================================

/// Output of [`TransportAdapter::wrap`]: a script ready to attach to a page.
///
/// Carries the wrapped source alongside the substitution snapshot so a
/// simulated page can seed the injected globals without executing script
/// text, while a real driver attaches `source` verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectableScript {
    /// Wrapped script source.
    pub source: String,

    /// The substitutions that were rendered into the source.
    pub substitutions: Substitutions,
}

// ============================================================================
// TransportAdapter
// ============================================================================

/// Renders injectable scripts for one build variant.
///
/// The variant is fixed at construction; `wrap` and `mock_host_script`
/// select their strategy by exhaustive match.
#[derive(Debug, Clone, Copy)]
pub struct TransportAdapter {
    variant: BuildVariant,
}

impl TransportAdapter {
    /// Creates an adapter for the given variant.
    #[inline]
    #[must_use]
    pub fn new(variant: BuildVariant) -> Self {
        Self { variant }
    }

    /// Returns the variant this adapter renders for.
    #[inline]
    #[must_use]
    pub fn variant(&self) -> BuildVariant {
        self.variant
    }

    /// Renders an injectable script from a build artifact.
    ///
    /// Substitutes the fixed configuration placeholders, verifies no
    /// placeholder token is left unresolved, and applies the variant's
    /// wrapping strategy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedPlaceholders`] if the artifact contains
    /// placeholder tokens the substitution set does not cover, and
    /// [`Error::Json`] if a substitution value cannot be encoded.
    pub fn wrap(&self, artifact: &str, substitutions: &Substitutions) -> Result<InjectableScript> {
        debug!(
            variant = %self.variant,
            artifact_len = artifact.len(),
            "Wrapping artifact"
        );

        let resolved = substitutions.apply(artifact)?;
        let source = match self.variant {
            BuildVariant::AppleIsolated => webkit::wrap(&resolved),
            BuildVariant::Windows => windows::wrap(&resolved),
        };

        Ok(InjectableScript {
            source,
            substitutions: substitutions.clone(),
        })
    }

    /// Renders the variant's mock native-host shim as raw script text.
    ///
    /// Drivers that attach init scripts as source use this; the simulated
    /// page consumes the structured [`MockHostInstall`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the install payload cannot be encoded.
    pub fn mock_host_script(&self, install: &MockHostInstall) -> Result<String> {
        let install_json = serde_json::to_string(install)?;

        Ok(match self.variant {
            BuildVariant::AppleIsolated => webkit::mock_host_script(&install_json),
            BuildVariant::Windows => windows::mock_host_script(&install_json),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_name_resolves_supported_variants() {
        assert_eq!(
            BuildVariant::from_name("apple-isolated").unwrap(),
            BuildVariant::AppleIsolated
        );
        assert_eq!(
            BuildVariant::from_name("windows").unwrap(),
            BuildVariant::Windows
        );
    }

    #[test]
    fn test_every_variant_name_round_trips() {
        for variant in BuildVariant::ALL {
            assert_eq!(BuildVariant::from_name(variant.name()).unwrap(), variant);
            assert_eq!(variant.to_string(), variant.name());
        }
    }

    #[test]
    fn test_from_name_rejects_unknown_variant() {
        let err = BuildVariant::from_name("android").unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "Unsupported build variant: android");
    }

    #[test]
    fn test_page_context_name_per_variant() {
        assert_eq!(
            BuildVariant::AppleIsolated.page_context_name(),
            "contentScopeScriptsIsolated"
        );
        assert_eq!(
            BuildVariant::Windows.page_context_name(),
            "contentScopeScripts"
        );
    }

    #[test]
    fn test_wrap_carries_substitution_snapshot() {
        let adapter = TransportAdapter::new(BuildVariant::AppleIsolated);
        let substitutions = Substitutions::new(
            json!({"features": {}}),
            vec![],
            json!({"platform": {"name": "macos"}, "debug": true}),
        );

        let script = adapter
            .wrap("const config = $CONTENT_SCOPE$;", &substitutions)
            .expect("wrap");

        assert_eq!(script.substitutions, substitutions);
        assert!(script.source.contains(r#"{"features":{}}"#));
    }

    #[test]
    fn test_mock_host_script_renders_per_variant_shim() {
        use crate::messaging::{MessagingContext, ResponseRegistry};

        let install = MockHostInstall::new(
            MessagingContext::development("contentScopeScripts", "brokerProtection"),
            ResponseRegistry::builder().response("ready", json!({})).build(),
        );

        let apple = TransportAdapter::new(BuildVariant::AppleIsolated)
            .mock_host_script(&install)
            .expect("apple shim");
        let windows = TransportAdapter::new(BuildVariant::Windows)
            .mock_host_script(&install)
            .expect("windows shim");

        assert!(apple.contains("messageHandlers"));
        assert!(windows.contains("windowsInteropPostMessage"));
        assert!(apple.contains("brokerProtection"));
    }

    #[test]
    fn test_wrap_strategies_differ_per_variant() {
        let substitutions = Substitutions::new(json!({}), vec![], json!({}));
        let artifact = "init($CONTENT_SCOPE$, $USER_PREFERENCES$, $USER_UNPROTECTED_DOMAINS$);";

        let apple = TransportAdapter::new(BuildVariant::AppleIsolated)
            .wrap(artifact, &substitutions)
            .expect("apple wrap");
        let windows = TransportAdapter::new(BuildVariant::Windows)
            .wrap(artifact, &substitutions)
            .expect("windows wrap");

        assert_ne!(apple.source, windows.source);
    }
}
