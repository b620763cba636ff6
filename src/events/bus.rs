//! Event bus for broadcasting bridge events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that lets the
//! bridge and interested listeners exchange [`Event`]s.
//!
//! - [`Bus::publish`] sends an event to all receivers (non-blocking).
//! - [`Bus::subscribe`] creates a new receiver for consuming events.
//!
//! This is used internally by the [`RuntimeBridge`](crate::RuntimeBridge) to
//! feed its subscriber listener, which fans events out to the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).

use tokio::sync::broadcast;

use crate::events::Event;

/// Broadcast channel for bridge events.
///
/// Wrapper over [`tokio::sync::broadcast`] that provides `publish`/`subscribe`
/// methods for working with [`Event`]s.
#[derive(Clone)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to all receivers.
    ///
    /// Errors are ignored if there are no active receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Subscribes to the bus and returns a new receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
