//! Native-origin push event injection.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::driver::{BridgeCall, PageDriver};
use crate::error::Result;
use crate::messaging::{MessagingContext, SubscriptionMessage};

// ============================================================================
// SubscriptionInjector
// ============================================================================

/// Simulates native-origin push events delivered into one messaging context.
///
/// The injector is bound to its context at construction; every push is
/// scoped to that channel. Repeated pushes are independent deliveries,
/// nothing is deduplicated.
pub struct SubscriptionInjector {
    driver: Arc<dyn PageDriver>,
    context: MessagingContext,
}

impl SubscriptionInjector {
    /// Creates an injector for one messaging context.
    #[inline]
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, context: MessagingContext) -> Self {
        Self { driver, context }
    }

    /// Returns the context this injector delivers into.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &MessagingContext {
        &self.context
    }

    /// Delivers exactly one subscription event into the page.
    ///
    /// The evaluate round trip resolves only after the page has processed
    /// the event, so assertions made after this call observe its effects.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluate round trip fails.
    pub async fn push(&self, name: &str, payload: Value) -> Result<()> {
        debug!(
            name = %name,
            context = %self.context.context,
            "Pushing subscription event"
        );

        let message = SubscriptionMessage::new(self.context.clone(), name, payload);
        self.driver
            .evaluate(BridgeCall::SimulateSubscription(message))
            .await?;
        Ok(())
    }
}
