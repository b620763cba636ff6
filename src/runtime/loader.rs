//! # Sub-runtime loader seam.
//!
//! [`RuntimeLoader`] is the external collaborator that discovers and
//! instantiates the embedded runtime: bundle lookup, dynamic-library loading,
//! native symbol binding, process arguments. None of that is modeled here;
//! the core only requires that a loader can produce a
//! [`RuntimeRef`](crate::RuntimeRef) wired to a given
//! [`BridgeListener`](crate::BridgeListener).
//!
//! The listener argument is the statically-typed replacement for runtime
//! class lookup: the loader binds the session's readiness/unload/message
//! signals to it during construction. Each load cycle receives a fresh
//! listener, so registration replaces rather than accumulates - a stale
//! session's signals are ignored by construction.

use async_trait::async_trait;

use crate::bridge::BridgeListener;
use crate::errors::BridgeError;
use crate::runtime::RuntimeRef;

/// Produces one sub-runtime session per load cycle.
#[async_trait]
pub trait RuntimeLoader: Send + Sync + 'static {
    /// Instantiates a fresh session and binds `listener` to its
    /// readiness-reached, unload-detected, and message signals.
    ///
    /// The session usually signals from its own execution context after it
    /// starts, but a readiness signal delivered while `load` is still running
    /// is safe: the bridge parks it and replays it once the handle is
    /// committed and started.
    ///
    /// # Errors
    /// [`BridgeError::LoadFailure`] when the platform cannot produce a
    /// session (missing bundle, unresolved symbols, ...). The bridge reverts
    /// to unloaded and keeps its pending queue for the next attempt.
    async fn load(&self, listener: BridgeListener) -> Result<RuntimeRef, BridgeError>;
}
