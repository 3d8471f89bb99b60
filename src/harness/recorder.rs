//! Read-side handle over the in-page call log.

use std::sync::Arc;

use tracing::debug;

use crate::driver::{BridgeCall, PageDriver};
use crate::error::{Error, Result};
use crate::messaging::OutgoingMessage;

// ============================================================================
// CallRecorder
// ============================================================================

/// Queries the append-only, insertion-ordered log of messages the content
/// script sent to the native host.
///
/// The log itself lives inside the test page's execution context; recording
/// happens on the page side. This handle only reads, and every read is an
/// asynchronous round trip across the automation boundary: a result is a
/// snapshot, never a live view.
#[derive(Clone)]
pub struct CallRecorder {
    driver: Arc<dyn PageDriver>,
}

impl CallRecorder {
    /// Creates a recorder reading through the given driver.
    #[inline]
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// Reads the full outgoing log in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or the log payload does not
    /// deserialize.
    pub async fn all(&self) -> Result<Vec<OutgoingMessage>> {
        let value = self.driver.evaluate(BridgeCall::ReadOutgoingCalls).await?;
        let messages: Vec<OutgoingMessage> = serde_json::from_value(value)
            .map_err(|e| Error::page(format!("outgoing log has unexpected shape: {e}")))?;

        debug!(total = messages.len(), "Read outgoing log");
        Ok(messages)
    }

    /// Reads all entries whose method equals `method`, in insertion order.
    ///
    /// Matching is exact; no prefix or partial matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn query(&self, method: &str) -> Result<Vec<OutgoingMessage>> {
        let messages = self.all().await?;
        Ok(messages
            .into_iter()
            .filter(|message| message.method() == method)
            .collect())
    }

    /// Counts the entries recorded for `method`.
    ///
    /// A dedicated page call, so callers polling a count always observe the
    /// live log.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn count(&self, method: &str) -> Result<usize> {
        let value = self
            .driver
            .evaluate(BridgeCall::CallCount {
                method: method.to_string(),
            })
            .await?;

        value
            .as_u64()
            .map(|count| count as usize)
            .ok_or_else(|| Error::page(format!("call count for '{method}' is not a number")))
    }
}
