//! Outbound calls and the pending queue.
//!
//! This module groups the **data model** of the forward channel:
//!
//! - [`OutboundCall`] — one immutable invocation destined for the sub-runtime.
//! - [`PendingQueue`] — FIFO buffer for calls produced before readiness.
//!
//! The queue is owned exclusively by [`RuntimeBridge`](crate::RuntimeBridge);
//! nothing outside the bridge mutates it.

mod call;
mod queue;

pub use call::OutboundCall;
pub use queue::PendingQueue;
