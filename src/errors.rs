//! Error types used by the bridge core.
//!
//! The single [`BridgeError`] enum covers every failure the bridge can
//! observe:
//!
//! - [`BridgeError::LoadFailure`] — the loader (or the handle's `start()`)
//!   could not bring up a sub-runtime session.
//! - [`BridgeError::DispatchFailure`] — the handle rejected an outbound call
//!   while claiming readiness.
//! - [`BridgeError::QueueOverflow`] — a configured pending-queue bound was
//!   exceeded (only possible when [`BridgeConfig::max_pending`] is non-zero).
//!
//! All variants recover locally: a load failure reverts the bridge to
//! `Unloaded` with the pending queue preserved, a dispatch failure drops the
//! single affected call, and an overflow rejects only the call that did not
//! fit. The helpers (`as_label`, `as_message`) follow the logging/metrics
//! conventions used across the crate.
//!
//! [`BridgeConfig::max_pending`]: crate::BridgeConfig::max_pending

use std::sync::Arc;
use thiserror::Error;

/// # Errors produced by the bridge core.
///
/// Every variant degrades to a logged, recoverable state; the core defines
/// no fatal conditions.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum BridgeError {
    /// The loader could not produce a handle, or the handle failed to start.
    ///
    /// The bridge reverts to `Unloaded`; calls buffered before the failed
    /// attempt stay queued for the next `show()`.
    #[error("sub-runtime load failed: {reason}")]
    LoadFailure {
        /// Underlying loader/start error message.
        reason: Arc<str>,
    },

    /// The handle rejected a dispatch while reporting itself ready.
    ///
    /// Non-fatal: the call is dropped (not retried, not re-queued), matching
    /// the fire-and-forget dispatch contract.
    #[error("dispatch of {target}.{method} rejected: {reason}")]
    DispatchFailure {
        /// Target object the call was addressed to.
        target: Arc<str>,
        /// Method name of the rejected call.
        method: Arc<str>,
        /// Underlying rejection message.
        reason: Arc<str>,
    },

    /// The pending queue reached its configured capacity.
    ///
    /// Only raised when [`BridgeConfig::max_pending`](crate::BridgeConfig::max_pending)
    /// is non-zero; the default configuration buffers without bound.
    #[error("pending queue full (capacity {capacity})")]
    QueueOverflow {
        /// The configured queue capacity that was hit.
        capacity: usize,
    },
}

impl BridgeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runbridge::BridgeError;
    ///
    /// let err = BridgeError::LoadFailure { reason: "bundle missing".into() };
    /// assert_eq!(err.as_label(), "load_failure");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BridgeError::LoadFailure { .. } => "load_failure",
            BridgeError::DispatchFailure { .. } => "dispatch_failure",
            BridgeError::QueueOverflow { .. } => "queue_overflow",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BridgeError::LoadFailure { reason } => format!("load failed: {reason}"),
            BridgeError::DispatchFailure {
                target,
                method,
                reason,
            } => format!("dispatch {target}.{method} rejected: {reason}"),
            BridgeError::QueueOverflow { capacity } => {
                format!("pending queue full: capacity={capacity}")
            }
        }
    }

    /// Indicates whether the bridge recovers from this error on its own.
    ///
    /// Currently `true` for every variant: the core defines no fatal
    /// conditions. Kept as a method so callers do not hard-code that
    /// assumption.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let load = BridgeError::LoadFailure {
            reason: "boom".into(),
        };
        let dispatch = BridgeError::DispatchFailure {
            target: "Ball".into(),
            method: "SetBallColor".into(),
            reason: "not ready".into(),
        };
        let overflow = BridgeError::QueueOverflow { capacity: 8 };

        assert_eq!(load.as_label(), "load_failure");
        assert_eq!(dispatch.as_label(), "dispatch_failure");
        assert_eq!(overflow.as_label(), "queue_overflow");
    }

    #[test]
    fn test_messages_carry_details() {
        let err = BridgeError::DispatchFailure {
            target: "Ball".into(),
            method: "SetBallColor".into(),
            reason: "not ready".into(),
        };
        let msg = err.as_message();
        assert!(msg.contains("Ball.SetBallColor"));
        assert!(msg.contains("not ready"));
    }

    #[test]
    fn test_all_variants_recoverable() {
        assert!(BridgeError::QueueOverflow { capacity: 1 }.is_recoverable());
        assert!(BridgeError::LoadFailure { reason: "x".into() }.is_recoverable());
    }
}
