//! Poll-based call-count synchronization.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::error::{Error, Result};
use crate::messaging::OutgoingMessage;

use super::CallRecorder;

// ============================================================================
// Constants
// ============================================================================

/// Default overall wait timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default poll interval.
pub const DEFAULT_POLL: Duration = Duration::from_millis(100);

// ============================================================================
// WaitOptions
// ============================================================================

/// Timing bounds for a call-count wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Maximum time to wait before failing.
    pub timeout: Duration,
    /// Fixed interval between polls.
    pub poll: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll: DEFAULT_POLL,
        }
    }
}

// ============================================================================
// WaitForCallCount
// ============================================================================

/// Blocks until a method has been recorded a given number of times.
///
/// Content-script activity has no deterministic callback hook, so the only
/// faithful way to synchronize with it is to poll: a bounded-interval,
/// bounded-timeout loop where each poll is a fresh read of the live log.
/// Counts are never cached between polls.
///
/// A wait either becomes satisfied (threshold reached) or fails with
/// [`Error::WaitTimeout`] once the timeout elapses; it never fails earlier,
/// and there is no cancel signal besides the timeout.
pub struct WaitForCallCount {
    recorder: CallRecorder,
}

impl WaitForCallCount {
    /// Creates a wait primitive reading through the given recorder.
    #[inline]
    #[must_use]
    pub fn new(recorder: CallRecorder) -> Self {
        Self { recorder }
    }

    /// Waits until `method` has been recorded at least `expected` times.
    ///
    /// Returns the matching messages in insertion order once satisfied.
    ///
    /// # Errors
    ///
    /// - [`Error::WaitTimeout`] if the threshold is not reached within
    ///   `options.timeout`, carrying the method, expected count, and the
    ///   last observed count
    /// - any error from the underlying recorder reads
    pub async fn wait(
        &self,
        method: &str,
        expected: usize,
        options: WaitOptions,
    ) -> Result<Vec<OutgoingMessage>> {
        let started = Instant::now();
        let deadline = started + options.timeout;

        loop {
            let observed = self.recorder.count(method).await?;
            if observed >= expected {
                debug!(
                    method = %method,
                    observed,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Wait satisfied"
                );
                return self.recorder.query(method).await;
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(Error::wait_timeout(
                    method,
                    expected,
                    observed,
                    options.timeout.as_millis() as u64,
                ));
            }

            // Never sleep past the deadline; the final poll lands on it.
            sleep_until(deadline.min(now + options.poll)).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{InitScript, PageDriver, SimulatedPage};
    use crate::harness::MockHostInstall;
    use crate::messaging::{MessagingContext, ResponseRegistry};
    use std::sync::Arc;
    use std::time::Duration;
    use serde_json::json;

    async fn navigated_page() -> SimulatedPage {
        let page = SimulatedPage::new();
        page.add_init_script(InitScript::MockHost(MockHostInstall::new(
            MessagingContext::development("contentScopeScripts", "brokerProtection"),
            ResponseRegistry::builder().build(),
        )))
        .await
        .unwrap();
        page.navigate("/pages/form.html").await.unwrap();
        page
    }

    fn wait_for(page: &SimulatedPage) -> WaitForCallCount {
        let driver: Arc<dyn PageDriver> = Arc::new(page.clone());
        WaitForCallCount::new(CallRecorder::new(driver))
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_fails_only_after_timeout() {
        let page = navigated_page().await;
        let wait = wait_for(&page);

        let started = Instant::now();
        let err = wait
            .wait("ready", 1, WaitOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(started.elapsed() >= DEFAULT_TIMEOUT);
        match err {
            Error::WaitTimeout {
                method,
                expected,
                observed,
                timeout_ms,
            } => {
                assert_eq!(method, "ready");
                assert_eq!(expected, 1);
                assert_eq!(observed, 0);
                assert_eq!(timeout_ms, 5000);
            }
            other => panic!("expected WaitTimeout, got {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_when_threshold_reached() {
        let page = navigated_page().await;
        let wait = wait_for(&page);

        // A concurrent task plays the content script after a few polls.
        let bridge = page.bridge();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            bridge.notify("ready", json!({}));
        });

        let calls = wait
            .wait("ready", 1, WaitOptions::default())
            .await
            .expect("wait satisfied");

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method(), "ready");
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_requires_full_count() {
        let page = navigated_page().await;
        let wait = wait_for(&page);
        page.bridge().notify("scan", json!({"step": 1}));

        let err = wait
            .wait(
                "scan",
                2,
                WaitOptions {
                    timeout: Duration::from_millis(500),
                    poll: Duration::from_millis(50),
                },
            )
            .await
            .unwrap_err();

        match err {
            Error::WaitTimeout { observed, .. } => assert_eq!(observed, 1),
            other => panic!("expected WaitTimeout, got {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_already_satisfied_returns_immediately() {
        let page = navigated_page().await;
        let wait = wait_for(&page);
        page.bridge().notify("ready", json!({}));

        let started = Instant::now();
        let calls = wait
            .wait("ready", 1, WaitOptions::default())
            .await
            .expect("already satisfied");

        assert_eq!(calls.len(), 1);
        assert!(started.elapsed() < DEFAULT_POLL);
    }
}
