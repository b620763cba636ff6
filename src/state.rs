//! # Bridge lifecycle state.
//!
//! [`BridgeState`] is the four-state machine at the heart of the bridge:
//!
//! ```text
//! Unloaded --show()/load ok--> Loading --runtime ready--> Ready
//! Ready --runtime reports unload--> Unloading --cleanup done--> Unloaded
//! Loading --load fails--> Unloaded
//! ```
//!
//! Exactly one state is current at any time. The state is owned exclusively
//! by [`RuntimeBridge`](crate::RuntimeBridge) and transitions only through
//! its methods; this module only defines the enum and a few predicates used
//! by the bridge and by subscribers inspecting events.

/// Lifecycle state of the embedded sub-runtime as seen by the bridge.
///
/// `Ready` is the only state from which `send()` dispatches synchronously;
/// every other state buffers outbound calls in the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// No sub-runtime session exists. `show()` starts a load.
    Unloaded,
    /// A load is in flight; the session has not signaled readiness yet.
    Loading,
    /// The session is live and accepts dispatched calls.
    Ready,
    /// The session reported unload and teardown is in progress.
    Unloading,
}

impl BridgeState {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BridgeState::Unloaded => "unloaded",
            BridgeState::Loading => "loading",
            BridgeState::Ready => "ready",
            BridgeState::Unloading => "unloading",
        }
    }

    /// True when `send()` buffers instead of dispatching.
    ///
    /// The pending queue only grows in these states; see the queue invariant
    /// on [`PendingQueue`](crate::PendingQueue).
    pub fn buffers_sends(&self) -> bool {
        !matches!(self, BridgeState::Ready)
    }

    /// True when outbound calls go straight to the handle.
    pub fn can_dispatch(&self) -> bool {
        matches!(self, BridgeState::Ready)
    }
}
