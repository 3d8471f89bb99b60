//! Feature page object.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info};
use url::Url;

use crate::driver::{BridgeCall, InitScript, PageDriver};
use crate::error::{Error, Result};
use crate::fixtures::{CaptchaDescriptor, FixtureDir};
use crate::harness::{
    CallRecorder, MockNativeHost, SubscriptionInjector, WaitForCallCount, WaitOptions,
};
use crate::messaging::{
    MessagingContext, OutgoingMessage, ResponseRegistry, subset_match,
};
use crate::transport::{BuildVariant, Substitutions, TransportAdapter};

use super::{PlatformInfo, TestMetadata};

// ============================================================================
// FeaturePage
// ============================================================================

/// High-level page object composing the bridge harness for one feature.
///
/// Construction resolves the platform/build combination once; everything
/// downstream selects behavior through the resulting [`BuildVariant`], never
/// by re-examining configuration strings.
pub struct FeaturePage {
    driver: Arc<dyn PageDriver>,
    adapter: TransportAdapter,
    platform: PlatformInfo,
    feature_name: String,
    artifact: String,
    pages_root: String,
    fixtures: FixtureDir,
}

impl std::fmt::Debug for FeaturePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturePage")
            .field("adapter", &self.adapter)
            .field("platform", &self.platform)
            .field("feature_name", &self.feature_name)
            .field("artifact", &self.artifact)
            .field("pages_root", &self.pages_root)
            .field("fixtures", &self.fixtures)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FeaturePage - Construction
// ============================================================================

impl FeaturePage {
    /// Creates a page object from test-project configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVariant`] if the metadata names a build
    /// the harness does not support.
    pub fn create(driver: Arc<dyn PageDriver>, metadata: TestMetadata) -> Result<Self> {
        let variant = BuildVariant::from_name(&metadata.build_name)?;

        info!(
            variant = %variant,
            platform = %metadata.platform.name,
            feature = %metadata.feature_name,
            "Creating feature page"
        );

        Ok(Self {
            driver,
            adapter: TransportAdapter::new(variant),
            platform: metadata.platform,
            feature_name: metadata.feature_name,
            artifact: metadata.artifact,
            pages_root: metadata.pages_root,
            fixtures: FixtureDir::new(metadata.fixtures_root),
        })
    }
}

// ============================================================================
// FeaturePage - Accessors
// ============================================================================

impl FeaturePage {
    /// Returns the build variant this page targets.
    #[inline]
    #[must_use]
    pub fn variant(&self) -> BuildVariant {
        self.adapter.variant()
    }

    /// Returns the platform this page targets.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    /// Returns the messaging context all of this page's traffic is scoped
    /// to.
    ///
    /// The page-world name follows the build variant; the environment is
    /// always `development` under test.
    #[must_use]
    pub fn messaging_context(&self) -> MessagingContext {
        MessagingContext::development(
            self.adapter.variant().page_context_name(),
            &self.feature_name,
        )
    }

    /// Returns a recorder over this page's outgoing log.
    #[must_use]
    pub fn recorder(&self) -> CallRecorder {
        CallRecorder::new(Arc::clone(&self.driver))
    }

    /// Returns an injector scoped to this page's messaging context.
    #[must_use]
    pub fn injector(&self) -> SubscriptionInjector {
        SubscriptionInjector::new(Arc::clone(&self.driver), self.messaging_context())
    }
}

// ============================================================================
// FeaturePage - Setup
// ============================================================================

impl FeaturePage {
    /// Sets the feature up with the `enabled` configuration fixture.
    pub async fn enabled(&self) -> Result<()> {
        let config = self.fixtures.load_config("enabled")?;
        self.setup(config).await
    }

    /// Sets the feature up with the given configuration.
    ///
    /// Registers the `ready` response, which every feature build requests
    /// at boot.
    pub async fn setup(&self, config: Value) -> Result<()> {
        let responses = ResponseRegistry::builder().response("ready", json!({})).build();
        self.setup_with_responses(config, responses).await
    }

    /// Sets the feature up with the given configuration and responses.
    ///
    /// Wraps the built artifact for the page's variant and installs the
    /// mock native host followed by the artifact, both as init scripts, so
    /// they are in place before the first page script executes. The
    /// response registry is frozen from here on.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedPlaceholders`] if the artifact carries tokens
    ///   the substitutions do not cover
    /// - any driver error from registering the init scripts
    pub async fn setup_with_responses(
        &self,
        config: Value,
        responses: ResponseRegistry,
    ) -> Result<()> {
        let substitutions = Substitutions::new(
            config,
            vec![],
            json!({
                "platform": {"name": self.platform.name},
                "debug": true
            }),
        );
        let script = self.adapter.wrap(&self.artifact, &substitutions)?;

        MockNativeHost::new(Arc::clone(&self.driver))
            .install(responses, self.messaging_context())
            .await?;
        self.driver
            .add_init_script(InitScript::Artifact(script))
            .await
    }

    /// Navigates to a fixture page below the configured pages root.
    pub async fn navigates_to(&self, page: &str) -> Result<()> {
        let url = format!("{}/{}", self.pages_root.trim_end_matches('/'), page);
        debug!(url = %url, "Navigating to fixture page");
        self.driver.navigate(&url).await
    }
}

// ============================================================================
// FeaturePage - Native Pushes
// ============================================================================

impl FeaturePage {
    /// Simulates the native side pushing an action into the page.
    ///
    /// Loads `actions/{fixture}` and delivers it as `onActionReceived`.
    pub async fn receives_action(&self, fixture: &str) -> Result<()> {
        let payload = self.fixtures.load_action(fixture)?;
        self.injector().push("onActionReceived", payload).await
    }

    /// Simulates the native side pushing initial data into the page.
    ///
    /// Loads `data/{fixture}` and delivers it as `onInit`.
    pub async fn receives_data(&self, fixture: &str) -> Result<()> {
        let payload = self.fixtures.load_data(fixture)?;
        self.injector().push("onInit", payload).await
    }
}

// ============================================================================
// FeaturePage - Synchronization
// ============================================================================

impl FeaturePage {
    /// Waits for one call to `method` and returns all matching messages.
    ///
    /// Uses the fixed defaults (5000ms timeout, 100ms poll).
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaitTimeout`] if no call arrives in time.
    pub async fn wait_for_message(&self, method: &str) -> Result<Vec<OutgoingMessage>> {
        WaitForCallCount::new(self.recorder())
            .wait(method, 1, WaitOptions::default())
            .await
    }

    /// Verifies the feature announced itself over the bridge.
    ///
    /// Waits for the `ready` call and checks it is scoped to this page's
    /// context and feature with empty params.
    ///
    /// # Errors
    ///
    /// - [`Error::WaitTimeout`] if no `ready` call arrives
    /// - [`Error::Assertion`] if the recorded call has the wrong shape
    pub async fn sends_ready_notification(&self) -> Result<()> {
        let calls = self.wait_for_message("ready").await?;
        let context = self.messaging_context();

        let expected = json!({
            "payload": {
                "context": context.context,
                "featureName": context.feature_name,
                "method": "ready",
                "params": {}
            }
        });

        if calls.len() != 1 {
            return Err(Error::assertion(format!(
                "expected exactly one 'ready' call, observed {}",
                calls.len()
            )));
        }

        let actual = serde_json::to_value(&calls[0])?;
        if !subset_match(&expected, &actual) {
            return Err(Error::assertion(format!(
                "'ready' call shape mismatch: expected {expected}, observed {actual}"
            )));
        }
        Ok(())
    }

    /// Reads the injected content-scope configuration back from the page.
    pub async fn injected_config(&self) -> Result<Value> {
        self.driver.evaluate(BridgeCall::ReadContentScope).await
    }
}

// ============================================================================
// FeaturePage - Assertion Helpers
// ============================================================================

impl FeaturePage {
    /// Returns `true` if the first message carries an error result.
    #[must_use]
    pub fn is_error_message(calls: &[OutgoingMessage]) -> bool {
        result_field_is_set(calls, "error")
    }

    /// Returns `true` if the first message carries a success result.
    ///
    /// The native side reports success under the literally misspelled
    /// `sucesss` key; the predicate matches it verbatim.
    #[must_use]
    pub fn is_success_message(calls: &[OutgoingMessage]) -> bool {
        result_field_is_set(calls, "sucesss")
    }

    /// Returns `true` if `state` strictly equals the captcha descriptor.
    #[must_use]
    pub fn is_captcha_match(state: &Value, expected: &CaptchaDescriptor) -> bool {
        serde_json::to_value(expected).map(|e| e == *state).unwrap_or(false)
    }

    /// Returns `true` if `actual` structurally contains `expected`.
    ///
    /// Extraction results may carry extra fields; only the expected
    /// person-record subset must match.
    #[must_use]
    pub fn is_extract_match(expected: &Value, actual: &Value) -> bool {
        subset_match(expected, actual)
    }

    /// Returns `true` if the response's `url` field equals `expected`.
    #[must_use]
    pub fn is_url_match(response: &Value, expected: &str) -> bool {
        response.get("url").and_then(Value::as_str) == Some(expected)
    }

    /// Returns `true` if the response's `url` field parses and carries no
    /// query parameters.
    #[must_use]
    pub fn is_query_param_removed(response: &Value) -> bool {
        response
            .get("url")
            .and_then(Value::as_str)
            .and_then(|raw| Url::parse(raw).ok())
            .is_some_and(|url| url.query().unwrap_or_default().is_empty())
    }
}

/// Checks the first call's `params.result.{field}` for a set, non-false
/// value.
fn result_field_is_set(calls: &[OutgoingMessage], field: &str) -> bool {
    calls
        .first()
        .and_then(|message| message.payload.result())
        .and_then(|result| result.get(field))
        .is_some_and(|value| !value.is_null() && *value != Value::Bool(false))
}

// ============================================================================
// Tests
// ============================================================================
