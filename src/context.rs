//! Notification Context
//!
//! Explicitly constructed owner of the store and its subscriptions, with a
//! defined lifetime. Consumers hold weak handles; using a handle after the
//! context is torn down surfaces `NotInitialized` instead of a silent
//! empty default.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use tokio::sync::watch;

use crate::error::{NotifyError, NotifyResult};
use crate::model::Notification;
use crate::store::{NotificationStore, StoreConfig};
use crate::subscription::{SubscriptionManager, SubscriptionState};
use crate::transport::EventTransport;

struct ContextInner {
    store: NotificationStore,
    subscriptions: SubscriptionManager,
}

/// Owns notification state for one consuming scope, typically the lifetime
/// of a UI tree. Dropping the context unsubscribes everything; handles
/// handed out earlier start failing fast.
pub struct NotificationContext {
    inner: Arc<ContextInner>,
}

impl NotificationContext {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let store = NotificationStore::with_config(config);
        let subscriptions = SubscriptionManager::new(store.clone());
        Self {
            inner: Arc::new(ContextInner {
                store,
                subscriptions,
            }),
        }
    }

    /// Attach (or replace) the transport delivering push events. The
    /// previous transport, if any, is fully unsubscribed first.
    pub fn set_transport(&self, transport: Arc<dyn EventTransport>) {
        self.inner.subscriptions.attach(transport);
    }

    /// Detach from the transport. Stored notifications survive until
    /// `clear`; only event delivery stops.
    pub fn clear_transport(&self) {
        self.inner.subscriptions.detach();
    }

    pub fn subscription_state(&self) -> SubscriptionState {
        self.inner.subscriptions.state()
    }

    /// Direct store access for the owning scope itself.
    pub fn store(&self) -> &NotificationStore {
        &self.inner.store
    }

    /// A weak consumer handle bound to this context's lifetime.
    pub fn handle(&self) -> NotificationsHandle {
        NotificationsHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for NotificationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable consumer-facing handle to a context's notification state.
///
/// Every operation fails with [`NotifyError::NotInitialized`] once the
/// owning context has been dropped.
#[derive(Clone)]
pub struct NotificationsHandle {
    inner: Weak<ContextInner>,
}

impl NotificationsHandle {
    fn upgrade(&self) -> NotifyResult<Arc<ContextInner>> {
        self.inner.upgrade().ok_or(NotifyError::NotInitialized)
    }

    /// Ordered snapshot, most recent insertion first.
    pub fn notifications(&self) -> NotifyResult<Vec<Notification>> {
        Ok(self.upgrade()?.store.notifications())
    }

    pub fn unread_count(&self) -> NotifyResult<usize> {
        Ok(self.upgrade()?.store.unread_count())
    }

    /// Insert a notification directly, bypassing the normalizer.
    pub fn add_notification(&self, notification: Notification) -> NotifyResult<()> {
        self.upgrade()?.store.insert(notification);
        Ok(())
    }

    pub fn mark_as_read(&self, id: &str) -> NotifyResult<()> {
        self.upgrade()?.store.mark_as_read(id);
        Ok(())
    }

    pub fn clear_notifications(&self) -> NotifyResult<()> {
        self.upgrade()?.store.clear();
        Ok(())
    }

    /// Reactive view of the ordered sequence.
    pub fn watch(&self) -> NotifyResult<watch::Receiver<VecDeque<Notification>>> {
        Ok(self.upgrade()?.store.watch())
    }
}
