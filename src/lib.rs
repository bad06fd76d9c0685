//! Real-time Notification Aggregation Layer
//!
//! Client-side notification core for an escrow marketplace. Receives
//! heterogeneous push events from a persistent-connection transport,
//! normalizes them into one canonical notification model, keeps an ordered
//! read/unread-tracked store with a reactive view, and manages subscription
//! lifecycle safely across connection churn.
//!
//! # Architecture
//!
//! - **Transport**: external collaborator owning the connection; this crate
//!   only registers and removes handlers through [`EventTransport`]
//! - **Normalizer**: maps each raw event into a canonical [`Notification`]
//! - **Store**: ordered most-recent-first sequence plus the derived unread
//!   count, observable through a watch channel
//! - **Context**: explicitly constructed owner of store and subscriptions,
//!   handing out fail-fast consumer handles
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use escrow_notify::{EventTransport, NotificationContext};
//!
//! # fn connect() -> Arc<dyn EventTransport> { unimplemented!() }
//! let context = NotificationContext::new();
//! let handle = context.handle();
//!
//! context.set_transport(connect());
//!
//! // events now flow into the store; the UI observes through the handle
//! let unread = handle.unread_count()?;
//! # Ok::<(), escrow_notify::NotifyError>(())
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod normalizer;
pub mod store;
pub mod subscription;
pub mod transport;

// Re-export core types for convenience
pub use context::{NotificationContext, NotificationsHandle};
pub use error::{NotifyError, NotifyResult};
pub use events::{EventKind, NotificationPayload, OrderStatusEvent, PaymentEvent, RawEvent};
pub use model::{Notification, NotificationKind};
pub use normalizer::normalize;
pub use store::{DedupPolicy, NotificationStore, StoreConfig};
pub use subscription::{SubscriptionManager, SubscriptionState};
pub use transport::{EventHandler, EventTransport};
