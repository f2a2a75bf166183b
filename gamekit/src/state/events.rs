//! Event Bus
//!
//! Named publish/subscribe used to wire game systems together without
//! direct references between them.

use std::collections::BTreeMap;

/// Event handler.
pub type Handler<T> = Box<dyn FnMut(&T)>;

/// Publish/subscribe hub for events carrying a `T` payload.
pub struct EventBus<T> {
    handlers: BTreeMap<String, Vec<Handler<T>>>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<T> EventBus<T> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `event`.
    pub fn on(&mut self, event: &str, handler: impl FnMut(&T) + 'static) {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Deliver `data` to every subscriber of `event`, in subscription order.
    ///
    /// Returns the number of handlers called.
    pub fn emit(&mut self, event: &str, data: &T) -> usize {
        match self.handlers.get_mut(event) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(data);
                }
                handlers.len()
            }
            None => 0,
        }
    }

    /// Subscribers of `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Remove all subscribers of `event`.
    pub fn clear(&mut self, event: &str) {
        self.handlers.remove(event);
    }
}
