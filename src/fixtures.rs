//! Filesystem-backed JSON fixture loading.
//!
//! Test fixtures live under one root directory with the conventional
//! layout:
//!
//! ```text
//! fixtures/
//! ├── config/    feature configurations passed to setup
//! ├── actions/   native push payloads for onActionReceived
//! └── data/      native push payloads for onInit
//! ```
//!
//! Malformed JSON fails with a parse error carrying the file path; a
//! missing file surfaces the IO error. Both fail the enclosing test.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

// ============================================================================
// FixtureDir
// ============================================================================

/// Loader for JSON fixtures under one root directory.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    /// Creates a loader rooted at `root`.
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the fixture root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads and parses the fixture at `relative` below the root.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file cannot be read
    /// - [`Error::Parse`] if the contents are not valid JSON
    pub fn load(&self, relative: impl AsRef<Path>) -> Result<Value> {
        let path = self.root.join(relative);
        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| Error::parse(path, e))
    }

    /// Loads a feature configuration: `config/{name}.json`.
    pub fn load_config(&self, name: &str) -> Result<Value> {
        self.load(Path::new("config").join(format!("{name}.json")))
    }

    /// Loads an action fixture: `actions/{name}`.
    pub fn load_action(&self, name: &str) -> Result<Value> {
        self.load(Path::new("actions").join(name))
    }

    /// Loads a data fixture: `data/{name}`.
    pub fn load_data(&self, name: &str) -> Result<Value> {
        self.load(Path::new("data").join(name))
    }
}

// ============================================================================
// CaptchaDescriptor
// ============================================================================

/// Captcha fixture shape: the state a captcha-solving action reports back.
///
/// Compared strictly in assertions: every field, no extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaDescriptor {
    /// Site key of the captcha widget.
    #[serde(rename = "siteKey")]
    pub site_key: String,

    /// Page URL the captcha was found on.
    pub url: String,

    /// Captcha flavor, e.g. `recaptcha2` or `hcaptcha`.
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Tests
// ============================================================================
