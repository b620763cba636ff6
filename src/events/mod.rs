//! Bridge events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle and delivery events emitted by the bridge.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: [`RuntimeBridge`](crate::RuntimeBridge) (every state
//!   transition, queue mutation, dispatch, and inbound message), plus the
//!   subscriber workers (overflow/panic reports).
//! - **Consumers**: the bridge's own subscriber listener, which fans events
//!   out to the [`SubscriberSet`](crate::subscribers::SubscriberSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
