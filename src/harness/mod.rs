//! Bridge operations the harness performs against a page.
//!
//! These components carry the real protocol and synchronization semantics:
//! installing the mock native host, pushing subscription events, reading the
//! outgoing call log, and waiting for call counts. All of them operate
//! through the [`PageDriver`](crate::driver::PageDriver) seam, so they work
//! identically against a real browser and the simulated page.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `mock_host` | Canned-response native host installation |
//! | `subscription` | Native-origin push event injection |
//! | `recorder` | Read-side handle over the in-page call log |
//! | `wait` | Poll-based call-count synchronization |

// ============================================================================
// Submodules
// ============================================================================

mod mock_host;
mod recorder;
mod subscription;
mod wait;

// ============================================================================
// Re-exports
// ============================================================================

pub use mock_host::{MockHostInstall, MockNativeHost};
pub use recorder::CallRecorder;
pub use subscription::SubscriptionInjector;
pub use wait::{DEFAULT_POLL, DEFAULT_TIMEOUT, WaitForCallCount, WaitOptions};
