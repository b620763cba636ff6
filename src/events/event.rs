//! # Events emitted by the bridge.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Load events**: the load sequence (requested, failed, ready)
//! - **Delivery events**: queueing, flushing, dispatching of outbound calls
//! - **Session events**: unload of the live sub-runtime session
//! - **Subscriber events**: fan-out overflow and panic reports
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! call's target/method, failure reasons, and queue sizes.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order across subscribers.
//!
//! ## Example
//! ```rust
//! use runbridge::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::CallQueued)
//!     .with_target("Ball")
//!     .with_method("SetBallColor")
//!     .with_queued(3);
//!
//! assert_eq!(ev.kind, EventKind::CallQueued);
//! assert_eq!(ev.target.as_deref(), Some("Ball"));
//! assert_eq!(ev.queued, Some(3));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of bridge events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Load events ===
    /// A load sequence started (`show()` on an unloaded bridge).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    LoadRequested,

    /// The loader (or the handle's `start()`) failed; state reverted to
    /// unloaded and the pending queue was preserved.
    ///
    /// Sets:
    /// - `reason`: loader/start error message
    /// - `queued`: calls still buffered for the next attempt
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    LoadFailed,

    /// The session signaled readiness; the bridge is about to flush.
    ///
    /// Sets:
    /// - `queued`: calls buffered at the moment readiness was reached
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RuntimeReady,

    // === Delivery events ===
    /// A call was appended to the pending queue.
    ///
    /// Sets:
    /// - `target`, `method`: addressing of the call
    /// - `queued`: queue length after the append
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CallQueued,

    /// A call was dispatched through the handle (directly or during a flush).
    ///
    /// Sets:
    /// - `target`, `method`: addressing of the call
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CallDispatched,

    /// The handle rejected a dispatch; the call was dropped.
    ///
    /// Sets:
    /// - `target`, `method`: addressing of the call
    /// - `reason`: rejection message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DispatchFailed,

    /// The pending queue was flushed after a readiness transition.
    ///
    /// Sets:
    /// - `queued`: number of calls delivered by this flush
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    QueueFlushed,

    /// The pending queue was discarded because the session unloaded.
    ///
    /// Sets:
    /// - `queued`: number of calls dropped
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    QueueDiscarded,

    // === Session events ===
    /// The sub-runtime session tore itself down; the bridge released the
    /// handle and returned presentation to the host.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RuntimeUnloaded,

    /// The sub-runtime sent a message to the host (reverse channel).
    ///
    /// Sets:
    /// - `reason`: the message text
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    MessageReceived,

    // === Subscriber events ===
    /// A subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `target`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberOverflow,

    /// A subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `target`: subscriber name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,
}

/// Bridge event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Target object of the call (or subscriber name for subscriber events).
    pub target: Option<Arc<str>>,
    /// Method name of the call, if applicable.
    pub method: Option<Arc<str>>,
    /// Human-readable reason (errors, messages, overflow details).
    pub reason: Option<Arc<str>>,
    /// Queue size relevant to this event (length, flushed, or dropped count).
    pub queued: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            target: None,
            method: None,
            reason: None,
            queued: None,
        }
    }

    /// Attaches the call's target (or a subscriber name).
    #[inline]
    pub fn with_target(mut self, target: impl Into<Arc<str>>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attaches the call's method name.
    #[inline]
    pub fn with_method(mut self, method: impl Into<Arc<str>>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a queue size (length after append, flushed or dropped count).
    #[inline]
    pub fn with_queued(mut self, queued: usize) -> Self {
        self.queued = Some(queued);
        self
    }
}
