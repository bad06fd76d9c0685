//! Subscription Lifecycle
//!
//! Binds transport event kinds to store mutations for the lifetime of one
//! consuming context: exactly one live handler per kind, full
//! unregistration before any re-registration, and tolerance for events
//! still in flight while a teardown completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::events::{EventKind, RawEvent};
use crate::normalizer;
use crate::store::NotificationStore;
use crate::transport::{EventHandler, EventTransport};

/// Lifecycle state of a subscription set.
///
/// `NoTransport -> Subscribed -> Unsubscribed -> Subscribed -> ...`
/// Terminal state on permanent context teardown is `Unsubscribed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// No transport has ever been attached; nothing is registered and no
    /// notifications are produced.
    NoTransport,

    /// A handler is registered for every event kind.
    Subscribed,

    /// Handlers were registered once and have been fully torn down.
    Unsubscribed,
}

struct ManagerInner {
    transport: Option<Arc<dyn EventTransport>>,
    // Invalidated before unregistration so an in-flight delivery racing the
    // teardown cannot mutate the store.
    liveness: Option<Arc<AtomicBool>>,
    state: SubscriptionState,
}

/// Registers store-feeding handlers with a transport and guarantees full
/// teardown on transport swap or context end.
pub struct SubscriptionManager {
    store: NotificationStore,
    inner: Mutex<ManagerInner>,
}

impl SubscriptionManager {
    pub fn new(store: NotificationStore) -> Self {
        Self {
            store,
            inner: Mutex::new(ManagerInner {
                transport: None,
                liveness: None,
                state: SubscriptionState::NoTransport,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubscriptionState {
        self.inner.lock().state
    }

    /// Attach a transport, registering exactly one handler per event kind.
    ///
    /// Any previous registration is fully torn down first, so a transport
    /// swap never leaves a leaked handler or double delivery behind.
    pub fn attach(&self, transport: Arc<dyn EventTransport>) {
        let mut inner = self.inner.lock();
        Self::teardown(&self.store, &mut inner);

        let token = Arc::new(AtomicBool::new(true));
        for kind in EventKind::ALL {
            transport.on(kind, Self::handler(self.store.clone(), Arc::clone(&token)));
        }
        self.store.set_transport(Arc::clone(&transport));

        inner.transport = Some(transport);
        inner.liveness = Some(token);
        inner.state = SubscriptionState::Subscribed;
        debug!("subscribed to {} event kinds", EventKind::ALL.len());
    }

    /// Unregister every handler from the current transport. Safe to call
    /// when nothing is attached.
    pub fn detach(&self) {
        let mut inner = self.inner.lock();
        Self::teardown(&self.store, &mut inner);
    }

    fn teardown(store: &NotificationStore, inner: &mut ManagerInner) {
        if let Some(token) = inner.liveness.take() {
            token.store(false, Ordering::SeqCst);
        }
        if let Some(transport) = inner.transport.take() {
            for kind in EventKind::ALL {
                transport.off(kind);
            }
            store.clear_transport();
            inner.state = SubscriptionState::Unsubscribed;
            debug!("unsubscribed from all event kinds");
        }
    }

    fn handler(store: NotificationStore, token: Arc<AtomicBool>) -> EventHandler {
        Arc::new(move |event: RawEvent| {
            if !token.load(Ordering::SeqCst) {
                debug!("dropping {} event delivered after teardown", event.kind());
                return;
            }
            store.insert(normalizer::normalize(event));
        })
    }
}

impl Drop for SubscriptionManager {
    fn drop(&mut self) {
        self.detach();
    }
}
