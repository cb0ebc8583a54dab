//! Webhook notifications for delegate votes, unvotes and missed blocks.
//!
//! The messenger subscribes to a host node's [`EventBus`] and turns
//! consensus events into chat notifications.
//!
//! Design:
//! - The host node owns the event bus and the wallet service; the messenger
//!   only consumes them (the wallet service through the [`AccountResolver`]
//!   seam).
//! - Dispatch is a pure filter + fanout: resolve the accounts, apply the
//!   delegate filter, render one message per configured webhook style, and
//!   hand each delivery to the channel without waiting for it.
//! - Deliveries are fire-and-forget: no retries, no ordering guarantees,
//!   failures are logged inside the delivery task and never reach the
//!   event-processing path.
//!
//! [`EventBus`]: herald_events::EventBus

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod resolver;
pub mod webhook;

pub use config::{EventHooks, MessengerConfig, WebhookConfig};
pub use dispatch::Messenger;
pub use error::MessengerError;
pub use format::{Notification, WebhookStyle};
pub use resolver::{Account, AccountResolver, MemoryResolver, ResolveError};
pub use webhook::{Delivery, DeliveryChannel, HttpChannel, NullChannel};
