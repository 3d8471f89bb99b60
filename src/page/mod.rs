//! Page object facade for test authors.
//!
//! [`FeaturePage`] composes the transport adapter, mock native host,
//! subscription injector, recorder, and wait primitive behind the
//! operations a test actually writes: set the feature up, navigate,
//! deliver native pushes, wait for messages, assert on shapes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bridge_harness::{FeaturePage, SimulatedPage, TestMetadata, Result};
//!
//! # async fn example() -> Result<()> {
//! let driver = Arc::new(SimulatedPage::new());
//! let metadata = TestMetadata::builder()
//!     .build_name("apple-isolated")
//!     .platform_name("macos")
//!     .feature_name("brokerProtection")
//!     .artifact("init($CONTENT_SCOPE$, $USER_PREFERENCES$);")
//!     .pages_root("/broker-protection/pages")
//!     .fixtures_root("./fixtures/broker-protection")
//!     .build()?;
//!
//! let page = FeaturePage::create(driver, metadata)?;
//! page.enabled().await?;
//! page.navigates_to("form.html").await?;
//! page.sends_ready_notification().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `metadata` | Per-project test configuration |
//! | `facade` | [`FeaturePage`] operations and assertion helpers |

// ============================================================================
// Submodules
// ============================================================================

mod facade;
mod metadata;

// ============================================================================
// Re-exports
// ============================================================================

pub use facade::FeaturePage;
pub use metadata::{PlatformInfo, TestMetadata, TestMetadataBuilder};
