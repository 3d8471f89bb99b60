//! Messaging context identifier.

use serde::{Deserialize, Serialize};

// ============================================================================
// MessagingContext
// ============================================================================

/// Identifier tuple scoping a logical communication channel.
///
/// Every message crossing the bridge belongs to exactly one context: the
/// page-world name, the feature the channel serves, and the environment.
///
/// # Format
///
/// ```json
/// {
///   "context": "contentScopeScriptsIsolated",
///   "featureName": "brokerProtection",
///   "env": "development"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingContext {
    /// Page-world name the channel lives in.
    pub context: String,

    /// Feature the channel serves.
    #[serde(rename = "featureName")]
    pub feature_name: String,

    /// Environment label.
    pub env: String,
}

impl MessagingContext {
    /// Creates a new messaging context.
    #[inline]
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        feature_name: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            feature_name: feature_name.into(),
            env: env.into(),
        }
    }

    /// Creates a context with the `development` environment label.
    #[inline]
    #[must_use]
    pub fn development(context: impl Into<String>, feature_name: impl Into<String>) -> Self {
        Self::new(context, feature_name, "development")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_serialization_uses_camel_case() {
        let context = MessagingContext::development("contentScopeScripts", "brokerProtection");
        let json = serde_json::to_string(&context).expect("serialize");

        assert!(json.contains("featureName"));
        assert!(json.contains("\"env\":\"development\""));
    }

    #[test]
    fn test_context_equality_scopes_channel() {
        let a = MessagingContext::development("contentScopeScripts", "brokerProtection");
        let b = MessagingContext::development("contentScopeScripts", "brokerProtection");
        let isolated =
            MessagingContext::development("contentScopeScriptsIsolated", "brokerProtection");

        assert_eq!(a, b);
        assert_ne!(a, isolated);
    }
}
