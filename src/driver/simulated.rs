//! In-memory page double.
//!
//! [`SimulatedPage`] implements [`PageDriver`] without a browser: it holds
//! the page-side half of the bridge (response registry, outgoing log,
//! delivered subscriptions, injected globals) and hands the content-script
//! side to a pluggable [`ContentScript`] behavior. Tests drive the harness
//! against it exactly as they would against a real driver; every
//! interaction still goes through the async `PageDriver` round trips.
//!
//! # Page Lifecycle
//!
//! 1. `add_init_script` - scripts queue up before navigation
//! 2. `navigate` - fresh page state is built by applying the init scripts
//!    in registration order; any previous state is discarded
//! 3. content script `boot` runs once the artifact is attached
//! 4. `evaluate` round trips operate on the live state
//!
//! State never survives a navigation; isolation between tests is structural.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::harness::MockHostInstall;
use crate::messaging::{MessagePayload, MessagingContext, OutgoingMessage, SubscriptionMessage};
use crate::transport::InjectableScript;

use super::{BridgeCall, InitScript, PageDriver};

// ============================================================================
// ContentScript
// ============================================================================

/// Scriptable behavior standing in for the injected content script.
///
/// Handlers run synchronously inside the page's evaluate round trip, which
/// is what guarantees a subscription push returns only after the page has
/// processed the event.
pub trait ContentScript: Send + Sync {
    /// Invoked once per navigation, after the feature artifact is attached.
    fn boot(&self, bridge: &PageBridge) {
        let _ = bridge;
    }

    /// Invoked for each subscription event delivered to the page.
    fn on_subscription(&self, bridge: &PageBridge, name: &str, payload: &Value) {
        let _ = (bridge, name, payload);
    }
}

/// Stock behavior: issues the `ready` request when the page boots.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadyOnBoot;

impl ContentScript for ReadyOnBoot {
    fn boot(&self, bridge: &PageBridge) {
        let _ = bridge.request("ready", Value::Object(Default::default()));
    }
}

// ============================================================================
// Page State
// ============================================================================

/// State owned by one loaded page, created at navigation and discarded at
/// the next one.
struct PageState {
    /// URL the page was navigated to.
    url: String,
    /// Mock host installation, if the init scripts included one.
    install: Option<MockHostInstall>,
    /// Attached feature artifact, if the init scripts included one.
    artifact: Option<InjectableScript>,
    /// Append-only log of calls toward the native host.
    outgoing: Vec<OutgoingMessage>,
    /// Subscription events delivered into this page.
    delivered: Vec<SubscriptionMessage>,
}

impl PageState {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            install: None,
            artifact: None,
            outgoing: Vec::new(),
            delivered: Vec::new(),
        }
    }

    fn apply(&mut self, script: &InitScript) {
        match script {
            InitScript::MockHost(install) => self.install = Some(install.clone()),
            InitScript::Artifact(artifact) => self.artifact = Some(artifact.clone()),
        }
    }

    fn count(&self, method: &str) -> usize {
        self.outgoing
            .iter()
            .filter(|message| message.method() == method)
            .count()
    }
}

struct PageShared {
    /// Scripts applied at every navigation, in registration order.
    init_scripts: Mutex<Vec<InitScript>>,
    /// Live page state; `None` until the first navigation.
    state: Mutex<Option<PageState>>,
    /// Simulated content-script behavior.
    content_script: Mutex<Option<Arc<dyn ContentScript>>>,
}

// ============================================================================
// SimulatedPage
// ============================================================================

/// In-memory [`PageDriver`] implementation.
#[derive(Clone)]
pub struct SimulatedPage {
    shared: Arc<PageShared>,
}

impl fmt::Debug for SimulatedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("SimulatedPage")
            .field("url", &state.as_ref().map(|s| s.url.as_str()))
            .field("outgoing", &state.as_ref().map_or(0, |s| s.outgoing.len()))
            .finish_non_exhaustive()
    }
}

impl Default for SimulatedPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPage {
    /// Creates an empty page with no navigation and no content script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(PageShared {
                init_scripts: Mutex::new(Vec::new()),
                state: Mutex::new(None),
                content_script: Mutex::new(None),
            }),
        }
    }

    /// Creates a page with the given content-script behavior installed.
    #[must_use]
    pub fn with_content_script(script: impl ContentScript + 'static) -> Self {
        let page = Self::new();
        page.install_content_script(script);
        page
    }

    /// Installs the simulated content-script behavior.
    ///
    /// Takes effect from the next navigation's boot; subscription handlers
    /// switch over immediately.
    pub fn install_content_script(&self, script: impl ContentScript + 'static) {
        *self.shared.content_script.lock() = Some(Arc::new(script));
    }

    /// Returns the content-script-side handle onto this page.
    #[must_use]
    pub fn bridge(&self) -> PageBridge {
        PageBridge {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns the subscription events delivered to the current page.
    #[must_use]
    pub fn delivered_subscriptions(&self) -> Vec<SubscriptionMessage> {
        self.shared
            .state
            .lock()
            .as_ref()
            .map(|state| state.delivered.clone())
            .unwrap_or_default()
    }

    /// Returns the URL of the current page, if navigated.
    #[must_use]
    pub fn current_url(&self) -> Option<String> {
        self.shared.state.lock().as_ref().map(|s| s.url.clone())
    }

    fn content_script_handle(&self) -> Option<Arc<dyn ContentScript>> {
        self.shared.content_script.lock().clone()
    }
}

// ============================================================================
// SimulatedPage - PageDriver
// ============================================================================

#[async_trait]
impl PageDriver for SimulatedPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating simulated page");

        let has_artifact = {
            let scripts = self.shared.init_scripts.lock();
            let mut state = PageState::new(url);
            for script in scripts.iter() {
                state.apply(script);
            }
            let has_artifact = state.artifact.is_some();
            *self.shared.state.lock() = Some(state);
            has_artifact
        };

        // Boot runs outside the locks so the handler can use the bridge.
        if has_artifact && let Some(script) = self.content_script_handle() {
            script.boot(&self.bridge());
        }

        Ok(())
    }

    async fn add_init_script(&self, script: InitScript) -> Result<()> {
        self.shared.init_scripts.lock().push(script);
        Ok(())
    }

    async fn evaluate(&self, call: BridgeCall) -> Result<Value> {
        match call {
            BridgeCall::SimulateSubscription(message) => {
                let handler = {
                    let mut guard = self.shared.state.lock();
                    let state = guard.as_mut().ok_or_else(no_page)?;

                    let installed_context = state.install.as_ref().map(|i| &i.messaging_context);
                    if installed_context != Some(&message.context) {
                        debug!(
                            name = %message.name,
                            context = %message.context.context,
                            "Subscription context matches no installed channel; dropping"
                        );
                        return Ok(Value::Null);
                    }

                    state.delivered.push(message.clone());
                    self.content_script_handle()
                };

                // Dispatch outside the state lock; the handler records its
                // own messages through the bridge.
                if let Some(script) = handler {
                    script.on_subscription(&self.bridge(), &message.name, &message.payload);
                }
                Ok(Value::Null)
            }

            BridgeCall::ReadOutgoingCalls => {
                let guard = self.shared.state.lock();
                let state = guard.as_ref().ok_or_else(no_page)?;
                Ok(serde_json::to_value(&state.outgoing)?)
            }

            BridgeCall::CallCount { method } => {
                let guard = self.shared.state.lock();
                let state = guard.as_ref().ok_or_else(no_page)?;
                Ok(Value::from(state.count(&method)))
            }

            BridgeCall::ReadContentScope => {
                let guard = self.shared.state.lock();
                let state = guard.as_ref().ok_or_else(no_page)?;
                Ok(state
                    .artifact
                    .as_ref()
                    .map(|artifact| artifact.substitutions.content_scope.clone())
                    .unwrap_or(Value::Null))
            }
        }
    }
}

fn no_page() -> Error {
    Error::page("no page loaded; navigate before evaluating")
}

// ============================================================================
// PageBridge
// ============================================================================

/// Content-script-side handle onto a [`SimulatedPage`].
///
/// Everything the emulated content script can do goes through here: inspect
/// its channel and configuration, fire notifications, and make requests
/// against the mock native host.
#[derive(Clone)]
pub struct PageBridge {
    shared: Arc<PageShared>,
}

impl fmt::Debug for PageBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBridge").finish_non_exhaustive()
    }
}

impl PageBridge {
    /// Returns the messaging context of the installed mock host, if any.
    #[must_use]
    pub fn messaging_context(&self) -> Option<MessagingContext> {
        self.shared
            .state
            .lock()
            .as_ref()
            .and_then(|state| state.install.as_ref())
            .map(|install| install.messaging_context.clone())
    }

    /// Returns the injected content-scope configuration.
    ///
    /// `Null` when no artifact is attached.
    #[must_use]
    pub fn content_scope(&self) -> Value {
        self.shared
            .state
            .lock()
            .as_ref()
            .and_then(|state| state.artifact.as_ref())
            .map(|artifact| artifact.substitutions.content_scope.clone())
            .unwrap_or(Value::Null)
    }

    /// Returns the URL of the current page.
    #[must_use]
    pub fn page_url(&self) -> String {
        self.shared
            .state
            .lock()
            .as_ref()
            .map(|state| state.url.clone())
            .unwrap_or_default()
    }

    /// Fires a notification toward the native host.
    ///
    /// The call is appended to the outgoing log; notifications never
    /// receive a response.
    pub fn notify(&self, method: &str, params: Value) {
        let _ = self.record(method, params);
    }

    /// Makes a request toward the native host.
    ///
    /// The call is appended to the outgoing log. Returns the canned
    /// response if one is registered for the method. Unregistered methods
    /// receive `None`; this is the silent-drop contract tests rely on.
    #[must_use]
    pub fn request(&self, method: &str, params: Value) -> Option<Value> {
        self.record(method, params)
    }

    /// Appends the call to the log and looks up a canned response.
    fn record(&self, method: &str, params: Value) -> Option<Value> {
        let mut guard = self.shared.state.lock();
        let state = guard.as_mut()?;
        let install = state.install.as_ref()?;

        let payload = MessagePayload::new(&install.messaging_context, method, params);
        let response = install.responses.get(method).cloned();

        debug!(
            method = %method,
            answered = response.is_some(),
            "Content script call recorded"
        );
        state.outgoing.push(OutgoingMessage::new(payload));
        response
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::ResponseRegistry;
    use crate::transport::Substitutions;
    use serde_json::json;

    fn context() -> MessagingContext {
        MessagingContext::development("contentScopeScripts", "brokerProtection")
    }

    fn install_script() -> InitScript {
        InitScript::MockHost(MockHostInstall::new(
            context(),
            ResponseRegistry::builder().response("ready", json!({})).build(),
        ))
    }

    fn artifact_script(content_scope: Value) -> InitScript {
        InitScript::Artifact(InjectableScript {
            source: "(() => {})();".to_string(),
            substitutions: Substitutions::new(content_scope, vec![], json!({})),
        })
    }

    #[tokio::test]
    async fn test_evaluate_before_navigation_fails() {
        let page = SimulatedPage::new();
        let err = page.evaluate(BridgeCall::ReadOutgoingCalls).await.unwrap_err();
        assert!(matches!(err, Error::Page { .. }));
    }

    #[tokio::test]
    async fn test_navigation_discards_previous_state() {
        let page = SimulatedPage::new();
        page.add_init_script(install_script()).await.unwrap();
        page.navigate("/pages/a.html").await.unwrap();

        page.bridge().notify("ready", json!({}));
        let count = page
            .evaluate(BridgeCall::CallCount {
                method: "ready".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(count, json!(1));

        page.navigate("/pages/b.html").await.unwrap();
        let count = page
            .evaluate(BridgeCall::CallCount {
                method: "ready".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(count, json!(0));
    }

    #[tokio::test]
    async fn test_ready_on_boot_requires_artifact() {
        let page = SimulatedPage::with_content_script(ReadyOnBoot);
        page.add_init_script(install_script()).await.unwrap();
        page.navigate("/pages/empty.html").await.unwrap();

        // No artifact attached, so the feature never booted.
        let calls = page.evaluate(BridgeCall::ReadOutgoingCalls).await.unwrap();
        assert_eq!(calls, json!([]));
    }

    #[tokio::test]
    async fn test_ready_on_boot_records_request() {
        let page = SimulatedPage::with_content_script(ReadyOnBoot);
        page.add_init_script(install_script()).await.unwrap();
        page.add_init_script(artifact_script(json!({}))).await.unwrap();
        page.navigate("/pages/form.html").await.unwrap();

        let calls: Vec<OutgoingMessage> = serde_json::from_value(
            page.evaluate(BridgeCall::ReadOutgoingCalls).await.unwrap(),
        )
        .unwrap();

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method(), "ready");
        assert_eq!(calls[0].payload.feature_name, "brokerProtection");
    }

    #[tokio::test]
    async fn test_request_without_registration_is_dropped() {
        let page = SimulatedPage::new();
        page.add_init_script(install_script()).await.unwrap();
        page.navigate("/pages/form.html").await.unwrap();

        let bridge = page.bridge();
        assert_eq!(bridge.request("ready", json!({})), Some(json!({})));
        assert_eq!(bridge.request("unregistered", json!({})), None);

        // Both calls were still recorded.
        let count = page
            .evaluate(BridgeCall::CallCount {
                method: "unregistered".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(count, json!(1));
    }

    #[tokio::test]
    async fn test_subscription_with_wrong_context_is_not_delivered() {
        let page = SimulatedPage::new();
        page.add_init_script(install_script()).await.unwrap();
        page.navigate("/pages/form.html").await.unwrap();

        let wrong = SubscriptionMessage::new(
            MessagingContext::development("contentScopeScriptsIsolated", "brokerProtection"),
            "onActionReceived",
            json!({}),
        );
        page.evaluate(BridgeCall::SimulateSubscription(wrong))
            .await
            .unwrap();

        assert!(page.delivered_subscriptions().is_empty());
    }

    #[tokio::test]
    async fn test_read_content_scope_reflects_artifact() {
        let page = SimulatedPage::new();
        page.add_init_script(install_script()).await.unwrap();
        page.add_init_script(artifact_script(json!({"features": {"a": 1}})))
            .await
            .unwrap();
        page.navigate("/pages/form.html").await.unwrap();

        let scope = page.evaluate(BridgeCall::ReadContentScope).await.unwrap();
        assert_eq!(scope, json!({"features": {"a": 1}}));

        // The content-script side observes the same channel and config.
        let bridge = page.bridge();
        assert_eq!(bridge.content_scope(), json!({"features": {"a": 1}}));
        assert_eq!(bridge.messaging_context(), Some(context()));
    }
}
