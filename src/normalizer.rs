//! Event Normalization
//!
//! Maps each raw transport event into exactly one canonical notification,
//! synchronously and with no side effects beyond the mapping. Normalization
//! is fail-soft: a payload missing an expected field gets a neutral
//! substitute and still produces a notification, never a panic and never a
//! silently dropped event.

use chrono::Utc;
use log::warn;
use uuid::Uuid;

use crate::events::{NotificationPayload, OrderStatusEvent, PaymentEvent, RawEvent};
use crate::model::{Notification, NotificationKind};

const ORDER_TITLE: &str = "Order update";
const PAYMENT_TITLE: &str = "Payment update";

/// Normalize a raw transport event into a canonical notification.
pub fn normalize(event: RawEvent) -> Notification {
    match event {
        RawEvent::Notification(payload) => from_payload(payload),
        RawEvent::OrderStatus(event) => from_order_status(event),
        RawEvent::Payment(event) => from_payment(event),
    }
}

/// Pass a fully-formed notification through unchanged, substituting neutral
/// values for whatever the payload left out.
fn from_payload(payload: NotificationPayload) -> Notification {
    let id = payload.id.unwrap_or_else(|| {
        // No subject id to derive a deterministic identity from; a random
        // one keeps mark-as-read usable for this notification.
        let id = Uuid::new_v4().to_string();
        warn!("notification payload missing id, synthesized {}", id);
        id
    });

    Notification {
        id,
        user_id: payload.user_id,
        kind: NotificationKind::from(payload.kind.unwrap_or_default()),
        title: payload.title.unwrap_or_default(),
        message: payload.message.unwrap_or_default(),
        read: false,
        created_at: payload.created_at.unwrap_or_else(Utc::now),
        related_id: payload.related_id,
    }
}

fn from_order_status(event: OrderStatusEvent) -> Notification {
    let order_id = event.order_id.unwrap_or_else(|| {
        warn!("order status event missing orderId");
        String::new()
    });
    let status = event.status.unwrap_or_default();

    Notification {
        id: format!("order-{}", order_id),
        user_id: None,
        kind: NotificationKind::OrderStatus,
        title: ORDER_TITLE.to_string(),
        message: format!("Your order status changed to {}", status),
        read: false,
        created_at: event.timestamp.unwrap_or_else(Utc::now),
        related_id: Some(order_id).filter(|id| !id.is_empty()),
    }
}

fn from_payment(event: PaymentEvent) -> Notification {
    let transaction_id = event.transaction_id.unwrap_or_else(|| {
        warn!("payment event missing transactionId");
        String::new()
    });
    let amount = event.amount.map(|a| a.to_string()).unwrap_or_default();
    let status = event.status.unwrap_or_default().to_lowercase();

    Notification {
        id: format!("payment-{}", transaction_id),
        user_id: None,
        kind: NotificationKind::Payment,
        title: PAYMENT_TITLE.to_string(),
        message: format!("Payment of {} was {}", amount, status),
        read: false,
        // payment events carry no timestamp; stamp with time of receipt
        created_at: Utc::now(),
        related_id: Some(transaction_id).filter(|id| !id.is_empty()),
    }
}
