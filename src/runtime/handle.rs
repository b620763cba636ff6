//! # Sub-runtime session handle.
//!
//! [`SubRuntime`] abstracts "a loadable sub-runtime instance": the live
//! session object produced by a [`RuntimeLoader`](crate::RuntimeLoader) for
//! one load cycle. The bridge holds at most one [`RuntimeRef`] at a time and
//! drops it when the session unloads; a reload produces a fresh handle.
//!
//! Readiness is signaled out-of-band through the
//! [`BridgeListener`](crate::BridgeListener) handed to the loader, not by
//! polling [`SubRuntime::is_ready`]; the bridge only consults `is_ready` as a
//! consistency check before dispatching.

use std::sync::Arc;

use async_trait::async_trait;

use crate::calls::OutboundCall;
use crate::errors::BridgeError;

/// Shared reference to a live sub-runtime session.
pub type RuntimeRef = Arc<dyn SubRuntime>;

/// Capability interface over one live sub-runtime session.
///
/// Implementations wrap whatever the platform's loaded engine instance is;
/// tests substitute an in-process fake. All methods may be called from the
/// bridge's critical section, so they should not block for long.
#[async_trait]
pub trait SubRuntime: Send + Sync + 'static {
    /// Begins executing the embedded runtime.
    ///
    /// Readiness is reported later through the session's
    /// [`BridgeListener`](crate::BridgeListener); a successful return here
    /// only means the start was initiated.
    ///
    /// # Errors
    /// [`BridgeError::LoadFailure`] if the runtime cannot initialize.
    async fn start(&self) -> Result<(), BridgeError>;

    /// True once the session accepts dispatched calls.
    fn is_ready(&self) -> bool;

    /// Brings the sub-runtime's view to the foreground.
    async fn present(&self);

    /// Delivers one outbound call into the runtime (fire-and-forget).
    ///
    /// # Errors
    /// [`BridgeError::DispatchFailure`] if the session rejects the call,
    /// e.g. when it is not actually ready.
    async fn dispatch(&self, call: &OutboundCall) -> Result<(), BridgeError>;

    /// Tears the session down. Called at most once, after which the bridge
    /// drops its reference.
    async fn stop(&self);
}
