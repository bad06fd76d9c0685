//! Event Transport Interface
//!
//! The persistent-connection collaborator. This layer never opens or
//! maintains the connection itself; it registers handlers, removes them,
//! and emits a best-effort read acknowledgment. Reconnect and backoff
//! belong to the implementation behind this trait.

use std::sync::Arc;

use crate::events::{EventKind, RawEvent};

/// Handler invoked by the transport when an event of the registered kind
/// arrives. Shared so the transport can hold it across deliveries.
pub type EventHandler = Arc<dyn Fn(RawEvent) + Send + Sync>;

/// Abstraction over the persistent bidirectional connection.
///
/// Events are delivered asynchronously relative to the caller that
/// registered the handler, but handler execution for one consuming context
/// is serialized: two events never run their handlers concurrently.
pub trait EventTransport: Send + Sync {
    /// Register `handler` for events of `kind`, replacing any handler
    /// previously registered under the same kind.
    fn on(&self, kind: EventKind, handler: EventHandler);

    /// Remove the handler registered for `kind`. Must be safe to call when
    /// no handler is registered.
    fn off(&self, kind: EventKind);

    /// Signal the remote side that a notification was read. Fire-and-forget:
    /// implementations must not block the caller and no failure is reported
    /// back.
    fn mark_notification_as_read(&self, id: &str);
}
