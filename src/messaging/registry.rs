//! Canned-response registry for the mock native host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rustc_hash::FxHashMap;

// ============================================================================
// ResponseRegistry
// ============================================================================

/// Mapping from method name to a canned response value.
///
/// Built once during test setup via [`ResponseRegistry::builder`] and fixed
/// for the lifetime of the test: the type exposes no mutation API after
/// `build()`, and installation moves it into the page state.
///
/// Methods absent from the registry receive no response at all (see
/// `MockNativeHost` for the silent-drop contract).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseRegistry {
    responses: FxHashMap<String, Value>,
}

impl ResponseRegistry {
    /// Creates a builder for assembling a registry.
    #[inline]
    #[must_use]
    pub fn builder() -> ResponseRegistryBuilder {
        ResponseRegistryBuilder::default()
    }

    /// Returns the canned response registered for `method`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&Value> {
        self.responses.get(method)
    }

    /// Returns `true` if a response is registered for `method`.
    #[inline]
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.responses.contains_key(method)
    }

    /// Returns the number of registered responses.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns `true` if no responses are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Iterates over the registered method names.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }
}

// ============================================================================
// ResponseRegistryBuilder
// ============================================================================

/// Builder for [`ResponseRegistry`].
///
/// # Example
///
/// ```
/// use bridge_harness::ResponseRegistry;
/// use serde_json::json;
///
/// let registry = ResponseRegistry::builder()
///     .response("ready", json!({}))
///     .response("getState", json!({"enabled": true}))
///     .build();
///
/// assert!(registry.contains("ready"));
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ResponseRegistryBuilder {
    responses: FxHashMap<String, Value>,
}

impl ResponseRegistryBuilder {
    /// Registers a canned response for `method`.
    ///
    /// Registering the same method twice keeps the latest value.
    #[inline]
    #[must_use]
    pub fn response(mut self, method: impl Into<String>, value: Value) -> Self {
        self.responses.insert(method.into(), value);
        self
    }

    /// Finalizes the registry.
    #[inline]
    #[must_use]
    pub fn build(self) -> ResponseRegistry {
        ResponseRegistry {
            responses: self.responses,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
