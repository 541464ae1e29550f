//! Synchronous event fan-out
//!
//! [`Subscribers`] keeps callbacks in registration order and invokes them
//! on the publishing thread. The list sits behind an `Arc<RwLock<..>>` so a
//! forwarding callback handed to the decode engine sees subscribers added
//! or removed after it was installed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Handle returned on subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ordered list of callbacks for events of type `T`
pub struct Subscribers<T> {
    callbacks: Arc<RwLock<Vec<(SubscriptionId, Callback<T>)>>>,
}

impl<T> Subscribers<T> {
    /// Empty list
    pub fn new() -> Self {
        Self {
            callbacks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a callback
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback; false when `id` is not registered here
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self
            .callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every callback with `event`, in registration order
    ///
    /// Callbacks run on a snapshot of the list, without the lock held.
    pub fn publish(&self, event: &T) {
        let snapshot: Vec<Callback<T>> = self
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }
}

impl<T: 'static> Subscribers<T> {
    /// A single callback that publishes to whoever is subscribed when it runs
    pub fn forwarder(&self) -> Arc<dyn Fn(&T) + Send + Sync> {
        let shared = Self {
            callbacks: Arc::clone(&self.callbacks),
        };
        Arc::new(move |event: &T| shared.publish(event))
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}
