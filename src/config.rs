//! # Bridge configuration.
//!
//! [`BridgeConfig`] defines the bridge's tunables: event bus capacity and the
//! optional bound on the pending-call queue.
//!
//! # Example
//! ```
//! use runbridge::BridgeConfig;
//!
//! let mut cfg = BridgeConfig::default();
//! cfg.bus_capacity = 256;
//! cfg.max_pending = 64;
//!
//! assert_eq!(cfg.max_pending, 64);
//! ```

/// Configuration for a [`RuntimeBridge`](crate::RuntimeBridge).
#[derive(Clone, Copy, Debug)]
pub struct BridgeConfig {
    /// Capacity of the event bus channel.
    pub bus_capacity: usize,
    /// Maximum number of pending calls buffered while the sub-runtime is not
    /// ready (0 = unbounded).
    ///
    /// The source system buffers without limit; the default preserves that.
    /// When set, `send()` returns
    /// [`BridgeError::QueueOverflow`](crate::BridgeError::QueueOverflow) for
    /// calls that do not fit.
    pub max_pending: usize,
}

impl Default for BridgeConfig {
    /// Provides a default configuration:
    /// - `bus_capacity = 1024`
    /// - `max_pending = 0` (unbounded)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            max_pending: 0,
        }
    }
}
