//! Notification Store
//!
//! Single source of truth the UI observes: an ordered sequence of canonical
//! notifications, most recent insertion first, plus the derived unread
//! count. The sequence lives inside a watch channel so every mutation
//! atomically publishes a new observable state to reactive consumers.
//!
//! All operations are synchronous and total. Insertion never talks to the
//! transport; mark-as-read additionally emits a best-effort read
//! acknowledgment that local state never depends on.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::Stream;
use log::debug;
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Notification;
use crate::transport::EventTransport;

/// Policy applied when an inserted notification carries an id that is
/// already present.
///
/// Synthesized ids are deterministic per subject, so an event redelivered
/// after a reconnect produces the same id as the original. Which behavior
/// is wanted depends on the product; the store makes it an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Keep both entries; the redelivered notification reappears at the
    /// front. Matches the historical behavior of the marketplace client.
    #[default]
    AllowDuplicates,

    /// Remove existing entries with the same id before prepending.
    ReplaceExisting,
}

/// Store configuration
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub dedup: DedupPolicy,
}

struct StoreShared {
    sequence: watch::Sender<VecDeque<Notification>>,
    transport: RwLock<Option<Arc<dyn EventTransport>>>,
    config: StoreConfig,
}

/// Shared handle to the notification store.
///
/// Cloning is cheap; all clones observe and mutate the same sequence.
#[derive(Clone)]
pub struct NotificationStore {
    shared: Arc<StoreShared>,
}

impl NotificationStore {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with a custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        let (sequence, _) = watch::channel(VecDeque::new());
        Self {
            shared: Arc::new(StoreShared {
                sequence,
                transport: RwLock::new(None),
                config,
            }),
        }
    }

    /// Attach the transport used for read acknowledgments.
    pub(crate) fn set_transport(&self, transport: Arc<dyn EventTransport>) {
        *self.shared.transport.write() = Some(transport);
    }

    pub(crate) fn clear_transport(&self) {
        *self.shared.transport.write() = None;
    }

    /// Prepend a notification to the front of the sequence. Purely local.
    pub fn insert(&self, notification: Notification) {
        let dedup = self.shared.config.dedup;
        self.shared.sequence.send_modify(|items| {
            if dedup == DedupPolicy::ReplaceExisting {
                items.retain(|existing| existing.id != notification.id);
            }
            items.push_front(notification);
        });
    }

    /// Flip `read` on every notification whose id matches, then signal the
    /// remote side so server-side read state can converge.
    ///
    /// The acknowledgment is fire-and-forget: the local flip has already
    /// happened and is never rolled back, and a missing transport only
    /// skips the signal.
    pub fn mark_as_read(&self, id: &str) {
        self.shared.sequence.send_if_modified(|items| {
            let mut changed = false;
            for item in items.iter_mut().filter(|item| item.id == id) {
                if !item.read {
                    item.read = true;
                    changed = true;
                }
            }
            changed
        });

        // clone out of the guard so a transport that re-enters the store
        // (ending in the slot's write lock) cannot deadlock
        let transport = self.shared.transport.read().clone();
        match transport {
            Some(transport) => transport.mark_notification_as_read(id),
            None => debug!("no transport attached, skipping read ack for {}", id),
        }
    }

    /// Remove every notification. Idempotent.
    pub fn clear(&self) {
        self.shared.sequence.send_if_modified(|items| {
            if items.is_empty() {
                false
            } else {
                items.clear();
                true
            }
        });
    }

    /// Snapshot of the ordered sequence, most recent insertion first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.shared.sequence.borrow().iter().cloned().collect()
    }

    /// Count of unread notifications. Always recomputed, never cached.
    pub fn unread_count(&self) -> usize {
        self.shared
            .sequence
            .borrow()
            .iter()
            .filter(|item| !item.read)
            .count()
    }

    pub fn len(&self) -> usize {
        self.shared.sequence.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.sequence.borrow().is_empty()
    }

    /// Reactive view: the receiver resolves whenever the sequence changes.
    pub fn watch(&self) -> watch::Receiver<VecDeque<Notification>> {
        self.shared.sequence.subscribe()
    }

    /// Stream adapter over [`NotificationStore::watch`]; yields the current
    /// state first, then every subsequent change.
    pub fn updates(&self) -> impl Stream<Item = VecDeque<Notification>> {
        WatchStream::new(self.shared.sequence.subscribe())
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}
