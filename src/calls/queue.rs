//! # Pending-call queue.
//!
//! [`PendingQueue`] buffers [`OutboundCall`]s produced while no sub-runtime
//! session can accept them. Strict FIFO; unbounded by default, optionally
//! capped via [`BridgeConfig::max_pending`](crate::BridgeConfig::max_pending).
//!
//! ## Invariants (enforced by the bridge, observable here)
//! - Non-empty only while the bridge state buffers sends
//!   ([`BridgeState::buffers_sends`](crate::BridgeState::buffers_sends)).
//! - Drained exactly once per readiness transition: [`PendingQueue::drain`]
//!   hands out every buffered call in insertion order and leaves the queue
//!   empty, so a second drain yields nothing.
//! - Cleared wholesale on unload: [`PendingQueue::clear`] discards without
//!   delivering.

use std::collections::VecDeque;

use crate::calls::OutboundCall;

/// FIFO buffer of calls awaiting a ready sub-runtime.
///
/// `capacity = 0` means unbounded (the default), preserving the source
/// system's behavior of buffering without limit while a load is in flight.
#[derive(Debug, Default)]
pub struct PendingQueue {
    calls: VecDeque<OutboundCall>,
    capacity: usize,
}

impl PendingQueue {
    /// Creates a queue with the given capacity (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            calls: VecDeque::new(),
            capacity,
        }
    }

    /// Appends a call, preserving submission order.
    ///
    /// Returns `false` without enqueueing when a non-zero capacity is
    /// configured and already reached.
    pub fn push(&mut self, call: OutboundCall) -> bool {
        if self.capacity != 0 && self.calls.len() >= self.capacity {
            return false;
        }
        self.calls.push_back(call);
        true
    }

    /// Removes and returns every buffered call in insertion order.
    ///
    /// The queue is empty afterwards, which makes a flush idempotent in
    /// effect: already-drained calls can never be handed out again.
    pub fn drain(&mut self) -> Vec<OutboundCall> {
        self.calls.drain(..).collect()
    }

    /// Discards every buffered call without delivering.
    ///
    /// Returns how many calls were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.calls.len();
        self.calls.clear();
        dropped
    }

    /// Number of buffered calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Configured capacity (`0` = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
