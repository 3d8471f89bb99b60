//! Message types crossing the simulated bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MessagingContext;

// ============================================================================
// MessagePayload
// ============================================================================

/// Payload of a call made by the content script toward the native host.
///
/// # Format
///
/// ```json
/// {
///   "context": "contentScopeScripts",
///   "featureName": "brokerProtection",
///   "method": "ready",
///   "params": {}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Page-world name the call was made from.
    pub context: String,

    /// Feature the call belongs to.
    #[serde(rename = "featureName")]
    pub feature_name: String,

    /// Method name.
    pub method: String,

    /// Method parameters.
    #[serde(default)]
    pub params: Value,
}

impl MessagePayload {
    /// Creates a payload scoped to the given messaging context.
    #[inline]
    #[must_use]
    pub fn new(context: &MessagingContext, method: impl Into<String>, params: Value) -> Self {
        Self {
            context: context.context.clone(),
            feature_name: context.feature_name.clone(),
            method: method.into(),
            params,
        }
    }

    /// Returns the `params.result` subtree, if present.
    ///
    /// Feature responses report their outcome under this key; the assertion
    /// helpers on the page facade read it.
    #[inline]
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.params.get("result")
    }
}

// ============================================================================
// OutgoingMessage
// ============================================================================

/// One entry in the in-page log of calls toward the native host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// The captured call payload.
    pub payload: MessagePayload,
}

impl OutgoingMessage {
    /// Creates a log entry for the given payload.
    #[inline]
    #[must_use]
    pub fn new(payload: MessagePayload) -> Self {
        Self { payload }
    }

    /// Returns the method name of the captured call.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.payload.method
    }
}

// ============================================================================
// SubscriptionMessage
// ============================================================================

/// A push event originated by the simulated native host, delivered to the
/// content script outside the request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionMessage {
    /// Channel the event is scoped to.
    #[serde(rename = "messagingContext")]
    pub context: MessagingContext,

    /// Subscription name, e.g. `onActionReceived`.
    pub name: String,

    /// Event payload.
    pub payload: Value,
}

impl SubscriptionMessage {
    /// Creates a subscription event for the given channel.
    #[inline]
    #[must_use]
    pub fn new(context: MessagingContext, name: impl Into<String>, payload: Value) -> Self {
        Self {
            context,
            name: name.into(),
            payload,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Structural subset comparison between JSON values.
///
/// Returns `true` if every key/value pair in `expected` is present in
/// `actual`, recursing through objects. Arrays and scalars compare by
/// equality. Used by shape assertions where extra fields on the observed
/// message are acceptable.
#[must_use]
pub fn subset_match(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(expected_map), Value::Object(actual_map)) => {
            expected_map.iter().all(|(key, expected_value)| {
                actual_map
                    .get(key)
                    .is_some_and(|actual_value| subset_match(expected_value, actual_value))
            })
        }
        _ => expected == actual,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> MessagingContext {
        MessagingContext::development("contentScopeScripts", "brokerProtection")
    }

    #[test]
    fn test_payload_scoped_to_context() {
        let payload = MessagePayload::new(&context(), "ready", json!({}));

        assert_eq!(payload.context, "contentScopeScripts");
        assert_eq!(payload.feature_name, "brokerProtection");
        assert_eq!(payload.method, "ready");
    }

    #[test]
    fn test_payload_serialization() {
        let payload = MessagePayload::new(&context(), "actionCompleted", json!({"result": {}}));
        let json = serde_json::to_string(&payload).expect("serialize");

        assert!(json.contains("featureName"));
        assert!(json.contains("actionCompleted"));
    }

    #[test]
    fn test_outgoing_message_deserialization() {
        let json_str = r#"{
            "payload": {
                "context": "contentScopeScripts",
                "featureName": "brokerProtection",
                "method": "ready",
                "params": {}
            }
        }"#;

        let message: OutgoingMessage = serde_json::from_str(json_str).expect("parse");
        assert_eq!(message.method(), "ready");
    }

    #[test]
    fn test_payload_result_accessor() {
        let payload = MessagePayload::new(
            &context(),
            "actionCompleted",
            json!({"result": {"error": {"message": "no action handler"}}}),
        );

        let result = payload.result().expect("result present");
        assert!(result.get("error").is_some());

        let empty = MessagePayload::new(&context(), "ready", json!({}));
        assert!(empty.result().is_none());
    }

    #[test]
    fn test_subset_match_recurses_objects() {
        let expected = json!({"payload": {"method": "ready"}});
        let actual = json!({
            "payload": {"method": "ready", "params": {}},
            "extra": true
        });

        assert!(subset_match(&expected, &actual));
    }

    #[test]
    fn test_subset_match_rejects_differing_values() {
        let expected = json!({"method": "ready"});
        let actual = json!({"method": "init"});

        assert!(!subset_match(&expected, &actual));
    }

    #[test]
    fn test_subset_match_scalars_compare_by_equality() {
        assert!(subset_match(&json!(42), &json!(42)));
        assert!(!subset_match(&json!([1, 2]), &json!([1, 2, 3])));
    }
}
