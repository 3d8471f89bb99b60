//! Bridge Harness - Simulated native-messaging bridge for end-to-end tests.
//!
//! This library emulates a native host talking to an injected content
//! script, so end-to-end tests can drive request/response and
//! push-subscription traffic without the real platform messaging layer.
//!
//! # Architecture
//!
//! The harness sits on the test side of an automation boundary:
//!
//! - **Test side (Rust)**: installs the mock host, pushes subscription
//!   events, reads the outgoing call log, waits on call counts
//! - **Page side**: the wrapped feature artifact plus the in-page log,
//!   reached only through asynchronous evaluate round trips
//!
//! Key design principles:
//!
//! - One [`BuildVariant`] per platform flavor, resolved once at
//!   construction and matched exhaustively (no string dispatch per call)
//! - The in-page log is owned by the page state created at navigation and
//!   discarded at the next one; the harness only ever reads it
//! - Synchronization is a bounded poll loop over fresh reads, faithful to
//!   real native-message latency
//! - Every error fails the enclosing test; nothing is recovered locally
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use bridge_harness::{FeaturePage, SimulatedPage, ReadyOnBoot, TestMetadata, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // An in-memory page stands in for the browser driver
//!     let driver = Arc::new(SimulatedPage::with_content_script(ReadyOnBoot));
//!
//!     let metadata = TestMetadata::builder()
//!         .build_name("apple-isolated")
//!         .platform_name("macos")
//!         .feature_name("brokerProtection")
//!         .artifact("init($CONTENT_SCOPE$, $USER_PREFERENCES$);")
//!         .pages_root("/broker-protection/pages")
//!         .fixtures_root("./fixtures/broker-protection")
//!         .build()?;
//!
//!     let page = FeaturePage::create(driver, metadata)?;
//!     page.enabled().await?;
//!     page.navigates_to("form.html").await?;
//!     page.sends_ready_notification().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Automation seam: [`PageDriver`], [`SimulatedPage`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`fixtures`] | Filesystem JSON fixture loading |
//! | [`harness`] | Bridge operations: mock host, injector, recorder, wait |
//! | [`messaging`] | Wire shapes: contexts, messages, response registry |
//! | [`page`] | [`FeaturePage`] facade for test authors |
//! | [`transport`] | Build-variant wrapping and placeholder substitution |

// ============================================================================
// Modules
// ============================================================================

/// Page automation seam.
///
/// The [`PageDriver`] trait abstracts the browser automation driver; the
/// [`SimulatedPage`] implementation runs the page side in memory.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Filesystem-backed JSON fixture loading.
pub mod fixtures;

/// Bridge operations the harness performs against a page.
pub mod harness;

/// Messaging data model.
///
/// Contexts, outgoing and subscription messages, and the response registry.
pub mod messaging;

/// Page object facade for test authors.
pub mod page;

/// Transport adapters for the platform build variants.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Driver types
pub use driver::{
    BridgeCall, ContentScript, InitScript, PageBridge, PageDriver, ReadyOnBoot, SimulatedPage,
};

// Error types
pub use error::{Error, Result};

// Fixture types
pub use fixtures::{CaptchaDescriptor, FixtureDir};

// Harness types
pub use harness::{
    CallRecorder, MockHostInstall, MockNativeHost, SubscriptionInjector, WaitForCallCount,
    WaitOptions,
};

// Messaging types
pub use messaging::{
    MessagePayload, MessagingContext, OutgoingMessage, ResponseRegistry, SubscriptionMessage,
};

// Page types
pub use page::{FeaturePage, PlatformInfo, TestMetadata};

// Transport types
pub use transport::{BuildVariant, InjectableScript, Substitutions, TransportAdapter};
