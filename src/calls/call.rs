//! # Outbound call record.
//!
//! [`OutboundCall`] is the unit of the forward channel: one invocation of a
//! method on a named object inside the sub-runtime, with a string payload.
//! Created by [`RuntimeBridge::send`](crate::RuntimeBridge::send), consumed
//! when dispatched through the handle or discarded when the session unloads.
//!
//! # Example
//! ```
//! use runbridge::OutboundCall;
//!
//! let call = OutboundCall::new("Ball", "SetBallColor", "red");
//! assert_eq!(call.target(), "Ball");
//! assert_eq!(call.method(), "SetBallColor");
//! assert_eq!(call.payload(), "red");
//! ```

use std::fmt;
use std::sync::Arc;

/// One outbound invocation destined for the sub-runtime.
///
/// Immutable once built. Fields are shared `Arc<str>` so queued calls and
/// event metadata clone cheaply.
///
/// Content is **not** validated: empty target/method/payload are accepted and
/// forwarded as-is. The bridge inherits this from the system it models; it is
/// the handle's job to reject calls it cannot route.
#[derive(Clone, PartialEq, Eq)]
pub struct OutboundCall {
    target: Arc<str>,
    method: Arc<str>,
    payload: Arc<str>,
}

impl OutboundCall {
    /// Builds a call to `method` on the object named `target`, carrying
    /// `payload` verbatim.
    pub fn new(
        target: impl Into<Arc<str>>,
        method: impl Into<Arc<str>>,
        payload: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            target: target.into(),
            method: method.into(),
            payload: payload.into(),
        }
    }

    /// Name of the object inside the sub-runtime this call addresses.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Method to invoke on the target.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Payload forwarded verbatim to the sub-runtime.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Shared handle to the target name, for event metadata.
    pub(crate) fn target_arc(&self) -> Arc<str> {
        Arc::clone(&self.target)
    }

    /// Shared handle to the method name, for event metadata.
    pub(crate) fn method_arc(&self) -> Arc<str> {
        Arc::clone(&self.method)
    }
}

impl fmt::Debug for OutboundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundCall")
            .field("target", &self.target)
            .field("method", &self.method)
            .field("payload", &self.payload)
            .finish()
    }
}

impl fmt::Display for OutboundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({:?})", self.target, self.method, self.payload)
    }
}
