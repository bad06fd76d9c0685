//! End-to-end pipeline tests: transport delivery through normalization into
//! the store, observed through context handles and the reactive view.

mod common;

use common::{order_event, payment_event, MockTransport};
use escrow_notify::events::{NotificationPayload, RawEvent};
use escrow_notify::{NotificationContext, NotificationKind, NotifyError};
use futures::StreamExt;

#[test]
fn events_flow_into_the_store_most_recent_first() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());

    transport.emit(order_event("42", "SHIPPED"));
    transport.emit(payment_event("7", 500.0, "COMPLETED"));
    transport.emit(RawEvent::Notification(NotificationPayload {
        id: Some("n-1".to_string()),
        kind: Some("DISPUTE".to_string()),
        title: Some("Dispute opened".to_string()),
        message: Some("A buyer opened a dispute".to_string()),
        ..Default::default()
    }));

    let handle = context.handle();
    let notifications = handle.notifications().unwrap();
    let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n-1", "payment-7", "order-42"]);
    assert_eq!(handle.unread_count().unwrap(), 3);

    assert_eq!(notifications[2].kind, NotificationKind::OrderStatus);
    assert!(notifications[2].message.contains("SHIPPED"));
    assert_eq!(notifications[1].kind, NotificationKind::Payment);
    assert!(notifications[1].message.contains("500"));
    assert!(notifications[1].message.contains("completed"));
    assert_eq!(
        notifications[0].kind,
        NotificationKind::Other("DISPUTE".to_string())
    );
}

#[test]
fn mark_as_read_updates_locally_and_acks_the_server() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());
    let handle = context.handle();

    transport.emit(order_event("42", "SHIPPED"));
    assert_eq!(handle.unread_count().unwrap(), 1);

    handle.mark_as_read("order-42").unwrap();
    assert_eq!(handle.unread_count().unwrap(), 0);
    assert_eq!(transport.acked_ids(), vec!["order-42".to_string()]);
}

#[test]
fn redelivered_event_reappears_under_default_policy() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());

    transport.emit(order_event("42", "SHIPPED"));
    transport.emit(order_event("42", "SHIPPED"));

    let handle = context.handle();
    assert_eq!(handle.notifications().unwrap().len(), 2);

    // both copies share the synthesized id, so one mark reads them all
    handle.mark_as_read("order-42").unwrap();
    assert_eq!(handle.unread_count().unwrap(), 0);
}

#[test]
fn clear_empties_the_sequence() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());
    let handle = context.handle();

    transport.emit(order_event("42", "SHIPPED"));
    transport.emit(payment_event("7", 500.0, "COMPLETED"));

    handle.clear_notifications().unwrap();
    assert!(handle.notifications().unwrap().is_empty());
    assert_eq!(handle.unread_count().unwrap(), 0);
}

#[test]
fn handle_fails_fast_once_the_context_is_gone() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());
    let handle = context.handle();

    drop(context);

    // context teardown also unsubscribed everything
    assert_eq!(transport.handler_count(), 0);
    assert_eq!(handle.unread_count(), Err(NotifyError::NotInitialized));
}

#[tokio::test]
async fn reactive_stream_observes_every_mutation() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());

    let mut updates = Box::pin(context.store().updates());

    // initial state
    let state = updates.next().await.unwrap();
    assert!(state.is_empty());

    transport.emit(order_event("42", "SHIPPED"));
    let state = updates.next().await.unwrap();
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].id, "order-42");

    context.store().mark_as_read("order-42");
    let state = updates.next().await.unwrap();
    assert!(state[0].read);

    context.store().clear();
    let state = updates.next().await.unwrap();
    assert!(state.is_empty());
}

#[test]
fn update_stream_stays_pending_between_mutations() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());

    let mut updates = tokio_test::task::spawn(context.store().updates());

    // first poll yields the current (empty) state, then nothing is ready
    let initial = tokio_test::assert_ready!(updates.poll_next()).unwrap();
    assert!(initial.is_empty());
    tokio_test::assert_pending!(updates.poll_next());

    transport.emit(order_event("42", "SHIPPED"));
    assert!(updates.is_woken());
    let state = tokio_test::assert_ready!(updates.poll_next()).unwrap();
    assert_eq!(state[0].id, "order-42");
    tokio_test::assert_pending!(updates.poll_next());
}

#[tokio::test]
async fn watch_receiver_reports_changes() {
    let context = NotificationContext::new();
    let transport = MockTransport::new();
    context.set_transport(transport.clone());

    let mut rx = context.handle().watch().unwrap();
    assert!(!rx.has_changed().unwrap());

    transport.emit(payment_event("7", 500.0, "COMPLETED"));
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);
}
