//! Observable value
//!
//! A [`Store`] holds one value and a set of listeners. Every listener is
//! called with the current value when it subscribes and again after every
//! change. Listeners run synchronously on the thread that made the change,
//! after the store's locks have been released, so a listener may read the
//! store it is subscribed to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;
type IdleHook = Arc<dyn Fn() + Send + Sync>;

/// Shared, observable value
///
/// Cloning a store yields another handle to the same value.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    value: Mutex<T>,
    listeners: Mutex<Listeners<T>>,
    on_idle: Mutex<Option<IdleHook>>,
}

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

impl<T: Clone + Send + 'static> Store<T> {
    /// Creates a store holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(initial),
                listeners: Mutex::new(Listeners {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                on_idle: Mutex::new(None),
            }),
        }
    }

    /// Returns a copy of the current value
    pub fn get(&self) -> T {
        self.lock_value().clone()
    }

    /// Replaces the value and notifies every listener
    pub fn set(&self, value: T) {
        *self.lock_value() = value.clone();
        self.notify(&value);
    }

    /// Derives the next value from the current one and publishes it
    ///
    /// The read and the write happen under one lock, so concurrent updates
    /// are never lost. Returns the published value.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next = {
            let mut current = self.lock_value();
            let next = f(&current);
            *current = next.clone();
            next
        };
        self.notify(&next);
        next
    }

    /// Like [`update`](Self::update), but `f` may decline to change anything
    ///
    /// When `f` returns `None` the value is left alone and no listener is
    /// called.
    pub fn update_if(&self, f: impl FnOnce(&T) -> Option<T>) -> Option<T> {
        let next = {
            let mut current = self.lock_value();
            let next = f(&current)?;
            *current = next.clone();
            next
        };
        self.notify(&next);
        Some(next)
    }

    /// Registers a listener
    ///
    /// The listener is called immediately with the current value, then after
    /// every change until the returned [`Subscription`] is dropped or
    /// unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);
        let id = {
            let mut listeners = self
                .shared
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::clone(&listener)));
            id
        };

        listener(&self.get());

        let shared: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.remove(id);
            }
        })
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Installs a hook that runs whenever the last subscriber leaves
    pub fn on_idle(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self
            .shared
            .on_idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(hook));
    }

    fn lock_value(&self) -> MutexGuard<'_, T> {
        self.shared
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }
}

impl<T> Shared<T> {
    fn remove(&self, id: u64) {
        let now_idle = {
            let mut listeners = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let before = listeners.entries.len();
            listeners.entries.retain(|(entry, _)| *entry != id);
            before > 0 && listeners.entries.is_empty()
        };

        if now_idle {
            let hook = self
                .on_idle
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(hook) = hook {
                hook();
            }
        }
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Handle returned by `subscribe`
///
/// Dropping it unsubscribes the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Stops delivering values to the listener
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}
