//! Shared test helpers
//!
//! `MockTransport` stands in for the persistent-connection collaborator:
//! it keeps one handler per event kind, lets tests deliver events on
//! demand, and records read acknowledgments.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use escrow_notify::events::{EventKind, OrderStatusEvent, PaymentEvent, RawEvent};
use escrow_notify::transport::{EventHandler, EventTransport};

#[derive(Default)]
pub struct MockTransport {
    handlers: Mutex<HashMap<EventKind, EventHandler>>,
    acked: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Deliver an event to the registered handler, if any.
    pub fn emit(&self, event: RawEvent) {
        let handler = self.handlers.lock().get(&event.kind()).cloned();
        if let Some(handler) = handler {
            handler(event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn acked_ids(&self) -> Vec<String> {
        self.acked.lock().clone()
    }
}

impl EventTransport for MockTransport {
    fn on(&self, kind: EventKind, handler: EventHandler) {
        self.handlers.lock().insert(kind, handler);
    }

    fn off(&self, kind: EventKind) {
        self.handlers.lock().remove(&kind);
    }

    fn mark_notification_as_read(&self, id: &str) {
        self.acked.lock().push(id.to_string());
    }
}

pub fn order_event(order_id: &str, status: &str) -> RawEvent {
    RawEvent::OrderStatus(OrderStatusEvent {
        order_id: Some(order_id.to_string()),
        status: Some(status.to_string()),
        timestamp: None,
    })
}

pub fn payment_event(transaction_id: &str, amount: f64, status: &str) -> RawEvent {
    RawEvent::Payment(PaymentEvent {
        transaction_id: Some(transaction_id.to_string()),
        amount: Some(amount),
        status: Some(status.to_string()),
    })
}
