//! Messaging data model.
//!
//! Types describing the simulated bridge's wire shapes: the context that
//! scopes a channel, the messages crossing it in both directions, and the
//! canned-response registry the mock native host serves from.
//!
//! # Message Directions
//!
//! ```text
//! ┌──────────────────┐   OutgoingMessage    ┌──────────────────┐
//! │  Content Script  │ ───────────────────► │  Native Host     │
//! │  (page world)    │ ◄─────────────────── │  (simulated)     │
//! └──────────────────┘  SubscriptionMessage └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `context` | [`MessagingContext`] channel identifier |
//! | `message` | [`OutgoingMessage`], [`SubscriptionMessage`], payload helpers |
//! | `registry` | [`ResponseRegistry`] canned responses |

// ============================================================================
// Submodules
// ============================================================================

mod context;
mod message;
mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::MessagingContext;
pub use message::{MessagePayload, OutgoingMessage, SubscriptionMessage, subset_match};
pub use registry::{ResponseRegistry, ResponseRegistryBuilder};
