//! Per-project test configuration.
//!
//! Test runners configure each project with a platform/build combination
//! plus the paths the harness reads from. [`TestMetadata`] captures that
//! configuration; [`FeaturePage::create`](super::FeaturePage::create)
//! resolves it into a live page object.

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use crate::error::{Error, Result};

// ============================================================================
// PlatformInfo
// ============================================================================

/// The platform a test project runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform name as reported in user preferences, e.g. `macos`.
    pub name: String,
}

impl PlatformInfo {
    /// Creates platform info.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ============================================================================
// TestMetadata
// ============================================================================

/// Resolved test-project configuration.
///
/// Use [`TestMetadata::builder`] to assemble one with validation.
#[derive(Debug, Clone)]
pub struct TestMetadata {
    /// Build variant name, e.g. `apple-isolated`.
    pub build_name: String,
    /// Platform the project targets.
    pub platform: PlatformInfo,
    /// Feature the channel serves.
    pub feature_name: String,
    /// Built content-script artifact source (with placeholder tokens).
    pub artifact: String,
    /// URL prefix the fixture pages are served under.
    pub pages_root: String,
    /// Filesystem root of the JSON fixtures.
    pub fixtures_root: PathBuf,
}

impl TestMetadata {
    /// Creates a builder with no configuration.
    #[inline]
    #[must_use]
    pub fn builder() -> TestMetadataBuilder {
        TestMetadataBuilder::default()
    }
}

// ============================================================================
// TestMetadataBuilder
// ============================================================================

/// Builder for [`TestMetadata`].
#[derive(Debug, Default, Clone)]
pub struct TestMetadataBuilder {
    build_name: Option<String>,
    platform_name: Option<String>,
    feature_name: Option<String>,
    artifact: Option<String>,
    pages_root: Option<String>,
    fixtures_root: Option<PathBuf>,
}

impl TestMetadataBuilder {
    /// Sets the build variant name.
    #[inline]
    #[must_use]
    pub fn build_name(mut self, name: impl Into<String>) -> Self {
        self.build_name = Some(name.into());
        self
    }

    /// Sets the platform name.
    #[inline]
    #[must_use]
    pub fn platform_name(mut self, name: impl Into<String>) -> Self {
        self.platform_name = Some(name.into());
        self
    }

    /// Sets the feature name.
    #[inline]
    #[must_use]
    pub fn feature_name(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    /// Sets the built artifact source.
    #[inline]
    #[must_use]
    pub fn artifact(mut self, source: impl Into<String>) -> Self {
        self.artifact = Some(source.into());
        self
    }

    /// Sets the URL prefix for fixture pages.
    #[inline]
    #[must_use]
    pub fn pages_root(mut self, root: impl Into<String>) -> Self {
        self.pages_root = Some(root.into());
        self
    }

    /// Sets the filesystem root for JSON fixtures.
    #[inline]
    #[must_use]
    pub fn fixtures_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fixtures_root = Some(root.into());
        self
    }

    /// Builds the metadata with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing or empty field.
    pub fn build(self) -> Result<TestMetadata> {
        let build_name = required(self.build_name, "build_name")?;
        let platform_name = required(self.platform_name, "platform_name")?;
        let feature_name = required(self.feature_name, "feature_name")?;
        let artifact = required(self.artifact, "artifact")?;
        let pages_root = required(self.pages_root, "pages_root")?;
        let fixtures_root = self.fixtures_root.ok_or_else(|| {
            Error::config("fixtures_root is required. Use .fixtures_root() to set it.")
        })?;

        Ok(TestMetadata {
            build_name,
            platform: PlatformInfo::new(platform_name),
            feature_name,
            artifact,
            pages_root,
            fixtures_root,
        })
    }
}

/// Validates a required, non-empty string field.
fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(Error::config(format!("{field} must not be empty"))),
        None => Err(Error::config(format!(
            "{field} is required. Use .{field}() to set it."
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> TestMetadataBuilder {
        TestMetadata::builder()
            .build_name("apple-isolated")
            .platform_name("macos")
            .feature_name("brokerProtection")
            .artifact("init($CONTENT_SCOPE$);")
            .pages_root("/broker-protection/pages")
            .fixtures_root("./fixtures")
    }

    #[test]
    fn test_builder_produces_metadata() {
        let metadata = complete_builder().build().expect("build");

        assert_eq!(metadata.build_name, "apple-isolated");
        assert_eq!(metadata.platform.name, "macos");
        assert_eq!(metadata.feature_name, "brokerProtection");
    }

    #[test]
    fn test_missing_field_is_a_config_error() {
        let err = TestMetadata::builder()
            .build_name("windows")
            .build()
            .unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("platform_name"));
    }

    #[test]
    fn test_empty_artifact_is_rejected() {
        let err = complete_builder().artifact("   ").build().unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("artifact"));
    }
}
