use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;
type Entries<E> = Mutex<HashMap<u64, Listener<E>>>;

/// Set of callbacks interested in events of type `E`
pub struct Listeners<E> {
    next_id: AtomicU64,
    entries: Arc<Entries<E>>,
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register `listener`; it stays registered until the returned handle is dropped
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_arc(Arc::new(listener))
    }

    pub(crate) fn subscribe_arc(&self, listener: Listener<E>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).insert(id, listener);

        let entries: Weak<Entries<E>> = Arc::downgrade(&self.entries);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(entries) = entries.upgrade() {
                    lock(&entries).remove(&id);
                }
            })),
        }
    }

    /// Call every registered listener with `event`.
    ///
    /// The registry lock is released before any listener runs, so a listener
    /// may drop its own subscription.
    pub fn notify(&self, event: &E) {
        let listeners: Vec<Listener<E>> = lock(&self.entries).values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<E>(entries: &Entries<E>) -> std::sync::MutexGuard<'_, HashMap<u64, Listener<E>>> {
    // A panicking listener never runs under this lock, so the map is never left half-updated
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registration handle; dropping it unregisters the listener
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
