//! # Event subscribers for the bridge.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`]
//! fan-out used to observe [`Event`](crate::events::Event)s broadcast through
//! the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   RuntimeBridge ── publish(Event) ──► Bus ──► subscriber listener
//!                                                │
//!                                                ▼
//!                                          SubscriberSet
//!                                     ┌─────────┼─────────┐
//!                                     ▼         ▼         ▼
//!                                 [queue 1] [queue 2] [queue N]
//!                                     ▼         ▼         ▼
//!                                 worker 1  worker 2  worker N
//!                                     ▼         ▼         ▼
//!                               sub1.on_event() ... subN.on_event()
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use runbridge::{Event, EventKind, Subscribe};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Subscribe for Metrics {
//!     async fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::DispatchFailed) {
//!             // increment a failure counter, ship a log line, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
