//! Change notifications for store subscribers.
//!
//! Every store owns a [`ChangeNotifier`] and fires a [`StoreChange`] after
//! each mutation has been applied in memory. Subscribers re-run whatever
//! aggregation they need; nothing derived is cached here.
//!
//! ## Example
//!
//! ```ignore
//! counts.subscribe(|change: StoreChange| {
//!     println!("{} {:?} {:?}", change.store, change.kind, change.id);
//! });
//! ```

use serde::{Deserialize, Serialize};

use crate::storage::StoreKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
    Selected,
    Cleared,
}

/// What changed, in which store. `id` is the entity id (or the memo day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub store: StoreKey,
    pub kind: ChangeKind,
    pub id: Option<String>,
}

impl StoreChange {
    pub fn new(store: StoreKey, kind: ChangeKind, id: Option<String>) -> Self {
        Self { store, kind, id }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(String);

#[cfg(feature = "emitter")]
mod emitter {
    use event_emitter_rs::EventEmitter;

    use super::{StoreChange, SubscriptionId};

    const CHANGE_EVENT: &str = "change";

    /// Fans store changes out to subscribers.
    ///
    /// Listeners run on emitter threads; `notify` waits for all of them so a
    /// mutation has been fully observed by the time the mutator returns.
    pub struct ChangeNotifier {
        emitter: EventEmitter,
        listeners: usize,
    }

    impl ChangeNotifier {
        pub fn new() -> Self {
            Self {
                emitter: EventEmitter::new(),
                listeners: 0,
            }
        }

        pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
        where
            F: Fn(StoreChange) + Send + Sync + 'static,
        {
            self.listeners += 1;
            SubscriptionId(self.emitter.on(CHANGE_EVENT, listener))
        }

        /// Returns true if the subscription existed.
        pub fn unsubscribe(&mut self, id: &SubscriptionId) -> bool {
            let removed = self.emitter.remove_listener(&id.0).is_some();
            if removed {
                self.listeners -= 1;
            }
            removed
        }

        pub fn subscriber_count(&self) -> usize {
            self.listeners
        }

        pub(crate) fn notify(&mut self, change: StoreChange) {
            if self.listeners == 0 {
                return;
            }
            for handle in self.emitter.emit(CHANGE_EVENT, change) {
                if handle.join().is_err() {
                    tracing::warn!("store change listener panicked");
                }
            }
        }
    }
}

#[cfg(not(feature = "emitter"))]
mod emitter {
    use super::StoreChange;

    /// Without the `emitter` feature changes are dropped.
    pub struct ChangeNotifier;

    impl ChangeNotifier {
        pub fn new() -> Self {
            Self
        }

        pub fn subscriber_count(&self) -> usize {
            0
        }

        pub(crate) fn notify(&mut self, _change: StoreChange) {}
    }
}

pub use emitter::ChangeNotifier;

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A store that publishes [`StoreChange`]s.
pub trait Observable {
    fn notifier(&mut self) -> &mut ChangeNotifier;

    /// Register a listener called after every mutation of this store.
    #[cfg(feature = "emitter")]
    fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(StoreChange) + Send + Sync + 'static,
    {
        self.notifier().subscribe(listener)
    }

    #[cfg(feature = "emitter")]
    fn unsubscribe(&mut self, id: &SubscriptionId) -> bool {
        self.notifier().unsubscribe(id)
    }
}
