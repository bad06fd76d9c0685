//! Raw Transport Event Types
//!
//! Wire-facing payloads delivered by the persistent connection. Fields the
//! server may omit are `Option`-typed: the normalizer substitutes neutral
//! values instead of rejecting a payload, so a sloppy event still produces
//! a notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The finite set of event kinds this layer subscribes to.
///
/// Registration and unregistration with the transport are keyed by this enum
/// rather than by event-name strings; the wire names live on [`RawEvent`]'s
/// tags and [`EventKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A fully-formed notification pushed as-is.
    Notification,

    /// An order changed status.
    OrderStatus,

    /// A payment transaction was updated.
    Payment,
}

impl EventKind {
    /// Every kind the subscription manager registers for.
    pub const ALL: [EventKind; 3] = [
        EventKind::Notification,
        EventKind::OrderStatus,
        EventKind::Payment,
    ];

    /// The wire name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Notification => "notification",
            EventKind::OrderStatus => "order_status_update",
            EventKind::Payment => "payment_update",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a fully-formed notification event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPayload {
    pub id: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub related_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload of an order-status-changed event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderStatusEvent {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Payload of a payment-updated event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentEvent {
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

/// A raw event as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum RawEvent {
    #[serde(rename = "notification")]
    Notification(NotificationPayload),

    #[serde(rename = "order_status_update")]
    OrderStatus(OrderStatusEvent),

    #[serde(rename = "payment_update")]
    Payment(PaymentEvent),
}

impl RawEvent {
    /// The kind this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            RawEvent::Notification(_) => EventKind::Notification,
            RawEvent::OrderStatus(_) => EventKind::OrderStatus,
            RawEvent::Payment(_) => EventKind::Payment,
        }
    }
}

impl From<NotificationPayload> for RawEvent {
    fn from(payload: NotificationPayload) -> Self {
        RawEvent::Notification(payload)
    }
}

impl From<OrderStatusEvent> for RawEvent {
    fn from(event: OrderStatusEvent) -> Self {
        RawEvent::OrderStatus(event)
    }
}

impl From<PaymentEvent> for RawEvent {
    fn from(event: PaymentEvent) -> Self {
        RawEvent::Payment(event)
    }
}
