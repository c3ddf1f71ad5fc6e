//! Single-threaded observer list.

use std::fmt;

/// Handle returned by [`Observable::add`]; pass it to [`Observable::remove`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// A list of callbacks notified in registration order.
///
/// Callbacks run on the caller's thread during [`Observable::notify_observers`]. They must
/// not subscribe to or unsubscribe from the same observable while being notified; the
/// observable is borrowed mutably for the whole dispatch.
pub struct Observable<T: ?Sized> {
    observers: Vec<(ObserverHandle, Callback<T>)>,
    next_id: u64,
}

impl<T: ?Sized> Default for Observable<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T: ?Sized> Observable<T> {
    /// Create an empty observable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn add<F>(&mut self, callback: F) -> ObserverHandle
    where
        F: FnMut(&T) + 'static,
    {
        let handle = ObserverHandle(self.next_id);
        self.next_id += 1;
        self.observers.push((handle, Box::new(callback)));
        handle
    }

    /// Remove a callback. Returns `false` if the handle was already removed.
    pub fn remove(&mut self, handle: ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    /// Whether any callback is registered.
    pub fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Number of registered callbacks.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Invoke every callback with `value`.
    pub fn notify_observers(&mut self, value: &T) {
        for (_, callback) in &mut self.observers {
            callback(value);
        }
    }
}
