//! Mock native host installation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::{InitScript, PageDriver};
use crate::error::Result;
use crate::messaging::{MessagingContext, ResponseRegistry};

// ============================================================================
// MockHostInstall
// ============================================================================

/// Payload of the mock-host init script.
///
/// # Format
///
/// ```json
/// {
///   "messagingContext": { "context": "...", "featureName": "...", "env": "..." },
///   "responses": { "ready": {} }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockHostInstall {
    /// Channel the mock host answers on.
    #[serde(rename = "messagingContext")]
    pub messaging_context: MessagingContext,

    /// Canned responses keyed by method name.
    pub responses: ResponseRegistry,
}

impl MockHostInstall {
    /// Creates an install payload.
    #[inline]
    #[must_use]
    pub fn new(messaging_context: MessagingContext, responses: ResponseRegistry) -> Self {
        Self {
            messaging_context,
            responses,
        }
    }
}

// ============================================================================
// MockNativeHost
// ============================================================================

/// Installs a per-test response registry into the page.
///
/// The registered init script intercepts outgoing calls whose
/// `(context, method)` matches an entry and answers with the registered
/// value.
///
/// # Silent Drop
///
/// Calls to methods absent from the registry receive no response at all,
/// not an error. This is intentional: a test can register nothing for a
/// method and assert the content script never calls it. A wait on such a
/// method fails with a timeout naming the method, which is the diagnosable
/// signal for a genuinely missing registration.
pub struct MockNativeHost {
    driver: Arc<dyn PageDriver>,
}

impl MockNativeHost {
    /// Creates a mock host bound to the given driver.
    #[inline]
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// Registers the response registry for one messaging context.
    ///
    /// Must run before the feature artifact is attached so the mock is in
    /// place when the first page script executes. The registry is moved
    /// into the page and fixed for the lifetime of the test.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the init script.
    pub async fn install(
        &self,
        responses: ResponseRegistry,
        context: MessagingContext,
    ) -> Result<()> {
        debug!(
            context = %context.context,
            feature = %context.feature_name,
            methods = responses.len(),
            "Installing mock native host"
        );

        self.driver
            .add_init_script(InitScript::MockHost(MockHostInstall::new(
                context, responses,
            )))
            .await
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
    fn test_install_payload_serialization() {
        let install = MockHostInstall::new(
            MessagingContext::development("contentScopeScripts", "brokerProtection"),
            ResponseRegistry::builder().response("ready", json!({})).build(),
        );

        let value = serde_json::to_value(&install).expect("serialize");
        assert_eq!(
            value,
            json!({
                "messagingContext": {
                    "context": "contentScopeScripts",
                    "featureName": "brokerProtection",
                    "env": "development"
                },
                "responses": {"ready": {}}
            })
        );
    }
}
