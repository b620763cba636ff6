//! # runbridge
//!
//! **Runbridge** is a lifecycle-and-message bridge between a host application
//! and an embedded sub-runtime (a game engine view, in the system it models)
//! that is loaded on demand, may not be ready when calls are produced, and
//! must be cleanly unloaded and reloaded.
//!
//! The core is a state machine governing the sub-runtime lifecycle combined
//! with a pending queue that buffers outbound calls generated before the
//! sub-runtime is ready and flushes them exactly once, in order, the moment
//! readiness is reached.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!        host caller                       host composition root
//!     show() / send()                   (owns the one RuntimeBridge)
//!            │                                      │
//!            ▼                                      ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  RuntimeBridge                                                    │
//! │  - BridgeState (Unloaded / Loading / Ready / Unloading)           │
//! │  - PendingQueue (FIFO, buffered while not Ready)                  │
//! │  - at most one RuntimeRef (new handle per load cycle)             │
//! │  - Bus (broadcast events) + SubscriberSet (fan-out)               │
//! └──────┬───────────────────────┬───────────────────────────┬───────┘
//!        │ loader.load(listener) │ dispatch/present/stop      │ events
//!        ▼                       ▼                             ▼
//! ┌──────────────┐      ┌──────────────┐              ┌──────────────┐
//! │RuntimeLoader │      │  SubRuntime  │              │ Subscribe    │
//! │ (platform)   │      │ (one session)│              │ (observers)  │
//! └──────────────┘      └──────┬───────┘              └──────────────┘
//!                              │ ready()/unloaded()/message()
//!                              ▼
//!                       BridgeListener ──► back into RuntimeBridge
//! ```
//!
//! ### Lifecycle
//! ```text
//! Unloaded --show()/load ok--> Loading --listener.ready()--> Ready
//! Ready --listener.unloaded()--> Unloading --cleanup done--> Unloaded
//! Loading --load fails--> Unloaded            (queue preserved)
//!
//! send(target, method, payload):
//!   ├─ Ready and handle reports ready ─► dispatch immediately
//!   └─ otherwise                      ─► append to PendingQueue
//!
//! listener.ready():
//!   ├─ Loading ─► Ready
//!   ├─ flush PendingQueue: dispatch every call, FIFO, exactly once
//!   └─ queue ends empty
//!
//! listener.unloaded():
//!   ├─ ─► Unloading
//!   ├─ clear PendingQueue (discard - the session is gone)
//!   ├─ release the handle, HostSurface::make_visible()
//!   └─ ─► Unloaded
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / traits                         |
//! |-------------------|--------------------------------------------------------------------|--------------------------------------------|
//! | **Bridge core**   | Lifecycle state machine and pending-call queue.                    | [`RuntimeBridge`], [`BridgeState`]         |
//! | **Calls**         | Immutable outbound invocations and their FIFO buffer.              | [`OutboundCall`], [`PendingQueue`]         |
//! | **Runtime seams** | Capability traits over the loadable sub-runtime and the host side. | [`SubRuntime`], [`RuntimeLoader`], [`HostSurface`], [`HostDelegate`] |
//! | **Signals**       | Session-scoped handle for readiness/unload/message callbacks.      | [`BridgeListener`]                         |
//! | **Events**        | Observe every transition, queueing, and dispatch.                  | [`Event`], [`EventKind`], [`Subscribe`]    |
//! | **Errors**        | Typed, recoverable failures of loading and dispatching.            | [`BridgeError`]                            |
//! | **Configuration** | Bus capacity and the optional pending-queue bound.                 | [`BridgeConfig`]                           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use runbridge::{
//!     BridgeConfig, BridgeError, BridgeListener, HostSurface, OutboundCall,
//!     RuntimeBridge, RuntimeLoader, RuntimeRef, SubRuntime,
//! };
//!
//! struct EngineSession { listener: BridgeListener }
//!
//! #[async_trait]
//! impl SubRuntime for EngineSession {
//!     async fn start(&self) -> Result<(), BridgeError> {
//!         let listener = self.listener.clone();
//!         tokio::spawn(async move { listener.ready().await });
//!         Ok(())
//!     }
//!     fn is_ready(&self) -> bool { true }
//!     async fn present(&self) {}
//!     async fn dispatch(&self, call: &OutboundCall) -> Result<(), BridgeError> {
//!         println!("engine <- {call}");
//!         Ok(())
//!     }
//!     async fn stop(&self) {}
//! }
//!
//! struct EngineLoader;
//!
//! #[async_trait]
//! impl RuntimeLoader for EngineLoader {
//!     async fn load(&self, listener: BridgeListener) -> Result<RuntimeRef, BridgeError> {
//!         Ok(Arc::new(EngineSession { listener }))
//!     }
//! }
//!
//! struct MainWindow;
//!
//! #[async_trait]
//! impl HostSurface for MainWindow {
//!     async fn make_visible(&self) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), BridgeError> {
//!     let bridge = RuntimeBridge::new(
//!         BridgeConfig::default(),
//!         Arc::new(EngineLoader),
//!         Arc::new(MainWindow),
//!         Vec::new(),
//!     );
//!
//!     // Buffered: the engine is not loaded yet.
//!     bridge.send("Ball", "SetBallColor", "red").await?;
//!     // Loads the engine; the buffered call flushes on readiness.
//!     bridge.show().await?;
//!     Ok(())
//! }
//! ```

mod bridge;
mod calls;
mod config;
mod errors;
mod events;
mod runtime;
mod state;
mod subscribers;

// ---- Public re-exports ----

pub use bridge::{BridgeListener, RuntimeBridge};
pub use calls::{OutboundCall, PendingQueue};
pub use config::BridgeConfig;
pub use errors::BridgeError;
pub use events::{Bus, Event, EventKind};
pub use runtime::{HostDelegate, HostSurface, RuntimeLoader, RuntimeRef, SubRuntime};
pub use state::BridgeState;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
