//! Page automation seam.
//!
//! The harness talks to the page under test through [`PageDriver`], a small
//! trait mirroring the primitives every browser automation driver provides:
//! navigate, register an init script, evaluate in page. Everything the
//! harness does (installing the mock host, pushing subscription events,
//! reading the outgoing log) is expressed through these three calls, so a
//! real driver and the in-memory [`SimulatedPage`] are interchangeable.
//!
//! All calls are asynchronous round trips to a separate execution context;
//! nothing here may be assumed synchronous.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `simulated` | In-memory page double with scriptable content-script behavior |

// ============================================================================
// Submodules
// ============================================================================

mod simulated;

// ============================================================================
// Re-exports
// ============================================================================

pub use simulated::{ContentScript, PageBridge, ReadyOnBoot, SimulatedPage};

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::harness::MockHostInstall;
use crate::messaging::SubscriptionMessage;
use crate::transport::InjectableScript;

// ============================================================================
// InitScript
// ============================================================================

/// A script registered to run before any page script on every navigation.
///
/// Two kinds exist, matching what the harness installs during setup. The
/// order of registration is the order of execution: the mock host must be
/// installed before the feature artifact boots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InitScript {
    /// Mock native-host installation.
    MockHost(MockHostInstall),

    /// The wrapped feature artifact.
    Artifact(InjectableScript),
}

// ============================================================================
// BridgeCall
// ============================================================================

/// Evaluate-in-page calls the harness performs.
///
/// Commands follow `bridge.methodName` format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum BridgeCall {
    /// Deliver one subscription event into the page.
    #[serde(rename = "bridge.simulateSubscription")]
    SimulateSubscription(SubscriptionMessage),

    /// Read the full outgoing-message log.
    #[serde(rename = "bridge.readOutgoingCalls")]
    ReadOutgoingCalls,

    /// Count outgoing calls to one method.
    ///
    /// A dedicated call so poll loops re-read the live log each time.
    #[serde(rename = "bridge.callCount")]
    CallCount {
        /// Method name to count.
        method: String,
    },

    /// Read the injected content-scope configuration back from the page.
    #[serde(rename = "bridge.readContentScope")]
    ReadContentScope,
}

// ============================================================================
// PageDriver
// ============================================================================

/// Browser automation primitives the harness depends on.
///
/// Implementations must be cheap to share across the harness components;
/// the crate passes them around as `Arc<dyn PageDriver>`.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates the page to `url`.
    ///
    /// Navigation re-runs the registered init scripts in a fresh execution
    /// context; any previous page state is discarded.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Registers a script to run before page scripts on every navigation.
    async fn add_init_script(&self, script: InitScript) -> Result<()>;

    /// Performs one evaluate round trip in the page's execution context.
    async fn evaluate(&self, call: BridgeCall) -> Result<Value>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessagingContext;
    use serde_json::json;

    #[test]
    fn test_bridge_call_serialization_uses_method_names() {
        let call = BridgeCall::CallCount {
            method: "ready".to_string(),
        };
        let json = serde_json::to_string(&call).expect("serialize");

        assert!(json.contains("bridge.callCount"));
        assert!(json.contains("\"method\":\"bridge.callCount\""));
    }

    #[test]
    fn test_simulate_subscription_round_trips() {
        let message = SubscriptionMessage::new(
            MessagingContext::development("contentScopeScripts", "brokerProtection"),
            "onActionReceived",
            json!({"action": {"actionType": "extract"}}),
        );
        let call = BridgeCall::SimulateSubscription(message.clone());

        let encoded = serde_json::to_string(&call).expect("serialize");
        let decoded: BridgeCall = serde_json::from_str(&encoded).expect("deserialize");

        match decoded {
            BridgeCall::SimulateSubscription(decoded_message) => {
                assert_eq!(decoded_message, message);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }
}
