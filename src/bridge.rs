//! # RuntimeBridge: lifecycle state machine plus pending-call queue.
//!
//! The [`RuntimeBridge`] owns the [`BridgeState`] machine, the
//! [`PendingQueue`], at most one live [`RuntimeRef`] at a time, and the event
//! bus. The host composition root constructs exactly one bridge and passes it
//! to callers; there is no implicit global.
//!
//! ## Key responsibilities
//! - buffer outbound calls produced before the sub-runtime is ready
//! - flush the buffer exactly once, in FIFO order, on the readiness signal
//! - keep `show()` idempotent while a load or unload is in flight
//! - recover from load failures with the buffer intact
//! - discard the buffer when the session unloads (stale calls for a dead
//!   session are dropped intentionally)
//!
//! ## Wiring
//! ```text
//! caller ── show()/send() ──► RuntimeBridge ── dispatch/present ──► SubRuntime
//!                                  ▲                                   │
//!                                  │ ready()/unloaded()/message()      │
//!                                  └────────── BridgeListener ◄────────┘
//!
//!   RuntimeBridge ── publish(Event) ──► Bus ──► subscriber listener ──► SubscriberSet
//!   RuntimeBridge ── on_runtime_message ──► HostDelegate   (immediate, never queued)
//!   RuntimeBridge ── make_visible ──► HostSurface          (on unload)
//! ```
//!
//! ## Concurrency
//! One `tokio::sync::Mutex` guards `{state, queue, runtime, session}`; every
//! public method and both lifecycle signals serialize on it, since the
//! session's signals may originate from a different execution context than
//! the callers of `show()`/`send()`. The loader and `start()` run **outside**
//! the critical section so a slow load never blocks `send()` — concurrent
//! calls keep buffering while the load is in flight.

use std::sync::{Arc, Weak};

use log::{debug, warn};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::calls::{OutboundCall, PendingQueue};
use crate::config::BridgeConfig;
use crate::errors::BridgeError;
use crate::events::{Bus, Event, EventKind};
use crate::runtime::{HostDelegate, HostSurface, RuntimeLoader, RuntimeRef};
use crate::state::BridgeState;
use crate::subscribers::{Subscribe, SubscriberSet};

/// State owned exclusively by the bridge, mutated under one lock.
struct Inner {
    state: BridgeState,
    queue: PendingQueue,
    runtime: Option<RuntimeRef>,
    /// Token of the current load session; cancelled when the session ends,
    /// which turns signals from stale [`BridgeListener`]s into no-ops.
    session: CancellationToken,
    /// A readiness signal arrived before the handle was committed; replayed
    /// once the load sequence finishes.
    early_ready: bool,
}

/// Lifecycle-and-message bridge between the host and an embedded sub-runtime.
///
/// See the [module docs](self) for the wiring diagram. Construct with
/// [`RuntimeBridge::new`] inside a tokio runtime (subscriber workers are
/// spawned at construction).
pub struct RuntimeBridge {
    loader: Arc<dyn RuntimeLoader>,
    surface: Arc<dyn HostSurface>,
    delegate: RwLock<Option<Arc<dyn HostDelegate>>>,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    inner: Mutex<Inner>,
    /// Weak self-reference used to mint session listeners.
    self_ref: Weak<RuntimeBridge>,
}

impl RuntimeBridge {
    /// Creates a bridge in the `Unloaded` state.
    ///
    /// Spawns one worker per subscriber plus the bus listener, so this must
    /// run inside a tokio runtime. The returned `Arc` is the single handle
    /// the host owns and injects into callers.
    pub fn new(
        cfg: BridgeConfig,
        loader: Arc<dyn RuntimeLoader>,
        surface: Arc<dyn HostSurface>,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Arc<Self> {
        let bus = Bus::new(cfg.bus_capacity);
        let subs = Arc::new(SubscriberSet::new(subscribers, bus.clone()));

        // No session yet; a cancelled token keeps the "token live iff a
        // session exists" invariant from the start.
        let session = CancellationToken::new();
        session.cancel();

        let bridge = Arc::new_cyclic(|self_ref| Self {
            loader,
            surface,
            delegate: RwLock::new(None),
            bus,
            subs,
            inner: Mutex::new(Inner {
                state: BridgeState::Unloaded,
                queue: PendingQueue::new(cfg.max_pending),
                runtime: None,
                session,
                early_ready: false,
            }),
            self_ref: self_ref.clone(),
        });

        bridge.subscriber_listener();
        bridge
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget). Exits when the bridge (and with it the bus sender)
    /// is dropped.
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    /// Brings the sub-runtime to the foreground, loading it on demand.
    ///
    /// - `Ready`: presents the live session and defensively flushes any
    ///   residual buffered calls (the queue should already be empty).
    /// - `Loading` / `Unloading`: no-op. Repeated calls while a load is in
    ///   flight trigger exactly one loader invocation.
    /// - `Unloaded`: transitions to `Loading`, mints a fresh session
    ///   [`BridgeListener`], invokes the loader, and starts the handle.
    ///
    /// # Errors
    /// [`BridgeError::LoadFailure`] when the loader or the handle's `start()`
    /// fails. The bridge reverts to `Unloaded`; calls buffered before the
    /// failed attempt stay queued for the next `show()`.
    pub async fn show(&self) -> Result<(), BridgeError> {
        {
            let mut inner = self.inner.lock().await;
            match inner.state {
                BridgeState::Ready => {
                    if let Some(runtime) = inner.runtime.clone() {
                        runtime.present().await;
                        self.flush_locked(&mut inner, &runtime).await;
                    }
                    return Ok(());
                }
                BridgeState::Loading | BridgeState::Unloading => {
                    debug!("show ignored: state={}", inner.state.as_label());
                    return Ok(());
                }
                BridgeState::Unloaded => {
                    inner.state = BridgeState::Loading;
                }
            }
        }
        self.bus.publish(Event::new(EventKind::LoadRequested));
        self.run_load().await
    }

    /// Sends one call toward the sub-runtime.
    ///
    /// Target, method, and payload are forwarded verbatim; empty values are
    /// accepted without validation. When the bridge is `Ready` and the handle
    /// reports ready, the call is dispatched immediately and fire-and-forget:
    /// a rejection is logged, published as [`EventKind::DispatchFailed`], and
    /// the call is dropped - not retried, not re-queued - while `send` still
    /// returns `Ok`. In every other state the call is buffered in FIFO order
    /// until readiness.
    ///
    /// Buffered calls are never dropped silently except on an explicit unload
    /// of the session they were addressed to.
    ///
    /// # Errors
    /// [`BridgeError::QueueOverflow`] when a non-zero
    /// [`BridgeConfig::max_pending`] is configured and the buffer is full.
    /// With the default unbounded queue, `send` never fails.
    pub async fn send(
        &self,
        target: impl Into<Arc<str>>,
        method: impl Into<Arc<str>>,
        payload: impl Into<Arc<str>>,
    ) -> Result<(), BridgeError> {
        let call = OutboundCall::new(target, method, payload);
        let mut inner = self.inner.lock().await;

        let live = match (&inner.state, &inner.runtime) {
            (BridgeState::Ready, Some(runtime)) if runtime.is_ready() => {
                Some(Arc::clone(runtime))
            }
            _ => None,
        };

        if let Some(runtime) = live {
            self.dispatch_one(&runtime, &call).await;
            return Ok(());
        }

        if !inner.queue.push(call.clone()) {
            let capacity = inner.queue.capacity();
            warn!("pending queue full (capacity {capacity}); rejecting {call}");
            return Err(BridgeError::QueueOverflow { capacity });
        }
        self.bus.publish(
            Event::new(EventKind::CallQueued)
                .with_target(call.target_arc())
                .with_method(call.method_arc())
                .with_queued(inner.queue.len()),
        );
        Ok(())
    }

    /// Read-only state snapshot for diagnostics and tests.
    pub async fn state(&self) -> BridgeState {
        self.inner.lock().await.state
    }

    /// Number of calls currently buffered, for diagnostics and tests.
    pub async fn pending(&self) -> usize {
        self.inner.lock().await.queue.len()
    }

    /// Registers the receiver for messages from the sub-runtime.
    ///
    /// Replaces any previously registered delegate, so repeated registration
    /// never causes duplicate delivery.
    pub async fn set_delegate(&self, delegate: Arc<dyn HostDelegate>) {
        *self.delegate.write().await = Some(delegate);
    }

    // --- load sequence ---

    /// Runs the loader and `start()` outside the critical section, then
    /// commits or reverts. Entered with state already set to `Loading`, which
    /// makes concurrent `show()` calls no-ops.
    async fn run_load(&self) -> Result<(), BridgeError> {
        let session = CancellationToken::new();
        let listener = BridgeListener {
            bridge: self.self_ref.clone(),
            session: session.clone(),
        };

        let runtime = match self.loader.load(listener).await {
            Ok(runtime) => runtime,
            Err(err) => return self.fail_load(&session, err).await,
        };

        // Commit the handle before start(): a fast session may signal
        // readiness immediately after start begins, and the flush needs the
        // handle in place. A signal that already arrived (a loader that spawns
        // its signal loop during load) was parked in `early_ready`.
        let early_ready = {
            let mut inner = self.inner.lock().await;
            inner.runtime = Some(Arc::clone(&runtime));
            inner.session = session.clone();
            std::mem::take(&mut inner.early_ready)
        };

        if let Err(err) = runtime.start().await {
            runtime.stop().await;
            return self.fail_load(&session, err).await;
        }

        if early_ready {
            self.runtime_ready(&session).await;
        }
        Ok(())
    }

    /// Reverts a failed load: tears down the partial session, restores
    /// `Unloaded`, keeps the queue for the next attempt.
    async fn fail_load(
        &self,
        session: &CancellationToken,
        err: BridgeError,
    ) -> Result<(), BridgeError> {
        session.cancel();
        let pending = {
            let mut inner = self.inner.lock().await;
            inner.runtime = None;
            inner.state = BridgeState::Unloaded;
            inner.early_ready = false;
            inner.queue.len()
        };
        warn!("sub-runtime load failed: {}", err.as_message());
        self.bus.publish(
            Event::new(EventKind::LoadFailed)
                .with_reason(err.as_message())
                .with_queued(pending),
        );
        Err(err)
    }

    // --- session signals (called via BridgeListener) ---

    /// Readiness signal: `Loading → Ready`, then flush the queue exactly
    /// once, in insertion order. Signals from stale or already-ready sessions
    /// are ignored.
    async fn runtime_ready(&self, session: &CancellationToken) {
        let mut inner = self.inner.lock().await;
        if session.is_cancelled() || inner.state != BridgeState::Loading {
            debug!("ready signal ignored: state={}", inner.state.as_label());
            return;
        }
        let Some(runtime) = inner.runtime.clone() else {
            // The session signaled before run_load committed the handle;
            // park the signal and replay it once the load sequence finishes.
            debug!("ready signal before handle commit; deferred");
            inner.early_ready = true;
            return;
        };

        inner.state = BridgeState::Ready;
        self.bus
            .publish(Event::new(EventKind::RuntimeReady).with_queued(inner.queue.len()));
        self.flush_locked(&mut inner, &runtime).await;
    }

    /// Unload signal: `→ Unloading`, discard the queue (the session is gone),
    /// release the handle, hand presentation back to the host, `→ Unloaded`.
    async fn runtime_unloaded(&self, session: &CancellationToken) {
        let mut inner = self.inner.lock().await;
        if session.is_cancelled()
            || matches!(inner.state, BridgeState::Unloaded | BridgeState::Unloading)
        {
            debug!("unload signal ignored: state={}", inner.state.as_label());
            return;
        }

        inner.state = BridgeState::Unloading;
        inner.session.cancel();

        let dropped = inner.queue.clear();
        if dropped > 0 {
            self.bus
                .publish(Event::new(EventKind::QueueDiscarded).with_queued(dropped));
        }

        inner.runtime = None;
        self.surface.make_visible().await;
        inner.state = BridgeState::Unloaded;
        self.bus.publish(Event::new(EventKind::RuntimeUnloaded));
    }

    /// Reverse-channel message: delivered to the delegate immediately, never
    /// buffered. Messages from a dead session are dropped.
    async fn runtime_message(&self, session: &CancellationToken, message: &str) {
        if session.is_cancelled() {
            debug!("message from dead session dropped: {message:?}");
            return;
        }
        let delegate = self.delegate.read().await.clone();
        if let Some(delegate) = delegate {
            delegate.on_runtime_message(message).await;
        }
        self.bus
            .publish(Event::new(EventKind::MessageReceived).with_reason(message));
    }

    // --- delivery ---

    /// Drains and dispatches every buffered call in insertion order. The
    /// queue ends empty, so a second flush for the same readiness transition
    /// delivers nothing.
    async fn flush_locked(&self, inner: &mut Inner, runtime: &RuntimeRef) {
        if inner.queue.is_empty() {
            return;
        }
        let calls = inner.queue.drain();
        let count = calls.len();
        for call in &calls {
            self.dispatch_one(runtime, call).await;
        }
        self.bus
            .publish(Event::new(EventKind::QueueFlushed).with_queued(count));
    }

    /// Dispatches one call, fire-and-forget. A rejection drops the call.
    async fn dispatch_one(&self, runtime: &RuntimeRef, call: &OutboundCall) {
        match runtime.dispatch(call).await {
            Ok(()) => {
                self.bus.publish(
                    Event::new(EventKind::CallDispatched)
                        .with_target(call.target_arc())
                        .with_method(call.method_arc()),
                );
            }
            Err(err) => {
                warn!("dropping {call}: {}", err.as_message());
                self.bus.publish(
                    Event::new(EventKind::DispatchFailed)
                        .with_target(call.target_arc())
                        .with_method(call.method_arc())
                        .with_reason(err.as_message()),
                );
            }
        }
    }
}

/// Session-scoped signal handle bound to the bridge.
///
/// The loader receives a fresh `BridgeListener` for every load cycle and
/// wires it to the session's readiness-reached, unload-detected, and message
/// signals. Because each session gets its own listener (and its own
/// cancellation token), registration replaces rather than accumulates, and
/// signals from an ended session are ignored.
///
/// Signals are normally delivered from the session's own execution context
/// once it is running. A readiness signal that arrives before the load
/// sequence commits the handle (a loader that spawns its signal loop during
/// `load`) is parked and replayed after `start()`, so it is never lost.
#[derive(Clone)]
pub struct BridgeListener {
    bridge: Weak<RuntimeBridge>,
    session: CancellationToken,
}

impl BridgeListener {
    /// Signals that the session finished starting and accepts calls.
    pub async fn ready(&self) {
        if let Some(bridge) = self.bridge.upgrade() {
            bridge.runtime_ready(&self.session).await;
        }
    }

    /// Signals that the session tore itself down.
    pub async fn unloaded(&self) {
        if let Some(bridge) = self.bridge.upgrade() {
            bridge.runtime_unloaded(&self.session).await;
        }
    }

    /// Forwards a message from the sub-runtime to the host delegate.
    pub async fn message(&self, message: &str) {
        if let Some(bridge) = self.bridge.upgrade() {
            bridge.runtime_message(&self.session, message).await;
        }
    }

    /// Token of this listener's session; cancelled once the session ends.
    ///
    /// Session implementations can use it to stop their own signal loops.
    pub fn session(&self) -> &CancellationToken {
        &self.session
    }
}
