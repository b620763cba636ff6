//! End-to-end scenarios for the bridge core, driven through scripted fakes:
//! a loader whose outcome the test controls, a runtime that records every
//! dispatched call, and a host surface that counts hand-backs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use runbridge::{
    BridgeConfig, BridgeError, BridgeListener, BridgeState, Event, EventKind, HostDelegate,
    HostSurface, OutboundCall, RuntimeBridge, RuntimeLoader, RuntimeRef, SubRuntime, Subscribe,
};

/// Sub-runtime fake: records dispatches, readiness and rejection are test-
/// controlled.
struct FakeRuntime {
    ready: AtomicBool,
    reject_dispatch: AtomicBool,
    started: AtomicUsize,
    presented: AtomicUsize,
    stopped: AtomicUsize,
    dispatched: Mutex<Vec<OutboundCall>>,
}

impl FakeRuntime {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            ready: AtomicBool::new(false),
            reject_dispatch: AtomicBool::new(false),
            started: AtomicUsize::new(0),
            presented: AtomicUsize::new(0),
            stopped: AtomicUsize::new(0),
            dispatched: Mutex::new(Vec::new()),
        })
    }

    fn payloads(&self) -> Vec<String> {
        self.dispatched
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.payload().to_string())
            .collect()
    }
}

#[async_trait]
impl SubRuntime for FakeRuntime {
    async fn start(&self) -> Result<(), BridgeError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn present(&self) {
        self.presented.fetch_add(1, Ordering::SeqCst);
    }

    async fn dispatch(&self, call: &OutboundCall) -> Result<(), BridgeError> {
        if self.reject_dispatch.load(Ordering::SeqCst) {
            return Err(BridgeError::DispatchFailure {
                target: call.target().into(),
                method: call.method().into(),
                reason: "simulated rejection".into(),
            });
        }
        self.dispatched.lock().unwrap().push(call.clone());
        Ok(())
    }

    async fn stop(&self) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Loader fake: counts invocations, optionally fails, and hands the minted
/// listener back to the test so readiness/unload can be signaled on demand.
struct FakeLoader {
    loads: AtomicUsize,
    fail_next: AtomicBool,
    listener: Mutex<Option<BridgeListener>>,
    runtime: Mutex<Option<Arc<FakeRuntime>>>,
}

impl FakeLoader {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            loads: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
            listener: Mutex::new(None),
            runtime: Mutex::new(None),
        })
    }

    fn listener(&self) -> BridgeListener {
        self.listener.lock().unwrap().clone().expect("no load yet")
    }

    fn runtime(&self) -> Arc<FakeRuntime> {
        self.runtime.lock().unwrap().clone().expect("no load yet")
    }

    /// Flips the session to ready and delivers the readiness signal.
    async fn signal_ready(&self) {
        self.runtime().ready.store(true, Ordering::SeqCst);
        self.listener().ready().await;
    }
}

#[async_trait]
impl RuntimeLoader for FakeLoader {
    async fn load(&self, listener: BridgeListener) -> Result<RuntimeRef, BridgeError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(BridgeError::LoadFailure {
                reason: "bundle missing".into(),
            });
        }
        let runtime = FakeRuntime::new();
        *self.listener.lock().unwrap() = Some(listener);
        *self.runtime.lock().unwrap() = Some(Arc::clone(&runtime));
        Ok(runtime)
    }
}

struct FakeSurface {
    visible: AtomicUsize,
}

#[async_trait]
impl HostSurface for FakeSurface {
    async fn make_visible(&self) {
        self.visible.fetch_add(1, Ordering::SeqCst);
    }
}

struct RecordingDelegate {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl HostDelegate for RecordingDelegate {
    async fn on_runtime_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct RecordingSubscriber {
    kinds: Mutex<Vec<EventKind>>,
}

#[async_trait]
impl Subscribe for RecordingSubscriber {
    async fn on_event(&self, event: &Event) {
        self.kinds.lock().unwrap().push(event.kind);
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn harness(cfg: BridgeConfig) -> (Arc<RuntimeBridge>, Arc<FakeLoader>, Arc<FakeSurface>) {
    let loader = FakeLoader::new();
    let surface = Arc::new(FakeSurface {
        visible: AtomicUsize::new(0),
    });
    let bridge = RuntimeBridge::new(
        cfg,
        Arc::clone(&loader) as Arc<dyn RuntimeLoader>,
        Arc::clone(&surface) as Arc<dyn HostSurface>,
        Vec::new(),
    );
    (bridge, loader, surface)
}

/// Drives the bridge from unloaded all the way to a ready session.
async fn show_until_ready(bridge: &Arc<RuntimeBridge>, loader: &FakeLoader) {
    bridge.show().await.expect("load should succeed");
    loader.signal_ready().await;
    assert_eq!(bridge.state().await, BridgeState::Ready);
}

#[tokio::test]
async fn buffered_calls_flush_once_in_order() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());

    for n in 0..3 {
        bridge
            .send("Ball", "SetBallColor", format!("color-{n}"))
            .await
            .unwrap();
    }
    assert_eq!(bridge.state().await, BridgeState::Unloaded);
    assert_eq!(bridge.pending().await, 3);

    bridge.show().await.unwrap();
    assert_eq!(bridge.state().await, BridgeState::Loading);
    // Still buffered: readiness has not been signaled.
    assert_eq!(bridge.pending().await, 3);

    loader.signal_ready().await;
    let runtime = loader.runtime();
    assert_eq!(runtime.payloads(), ["color-0", "color-1", "color-2"]);
    assert_eq!(bridge.pending().await, 0);

    // A duplicate readiness signal must not re-deliver anything.
    loader.listener().ready().await;
    assert_eq!(runtime.payloads().len(), 3);
}

#[tokio::test]
async fn ready_send_dispatches_immediately_without_queueing() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;

    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    assert_eq!(bridge.pending().await, 0);
    assert_eq!(loader.runtime().payloads(), ["red"]);
}

#[tokio::test]
async fn show_while_loading_invokes_loader_once() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());

    bridge.show().await.unwrap();
    bridge.show().await.unwrap();
    bridge.show().await.unwrap();

    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.state().await, BridgeState::Loading);
}

#[tokio::test]
async fn unload_discards_queue_and_returns_presentation() {
    let (bridge, loader, surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let runtime = loader.runtime();

    // An inconsistent session (claims Ready, handle says not ready) makes
    // sends buffer again, so the queue is non-empty at unload time.
    runtime.ready.store(false, Ordering::SeqCst);
    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    bridge.send("Ball", "SetBallColor", "blue").await.unwrap();
    assert_eq!(bridge.pending().await, 2);

    loader.listener().unloaded().await;

    assert_eq!(bridge.state().await, BridgeState::Unloaded);
    assert_eq!(bridge.pending().await, 0);
    assert_eq!(surface.visible.load(Ordering::SeqCst), 1);
    // Nothing from the discarded queue ever reached the session.
    assert!(runtime.payloads().is_empty());
}

#[tokio::test]
async fn calls_before_show_arrive_in_submission_order() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());

    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    bridge.send("Ball", "SetBallColor", "blue").await.unwrap();

    bridge.show().await.unwrap();
    loader.signal_ready().await;

    let calls = loader.runtime().dispatched.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        (calls[0].target(), calls[0].method(), calls[0].payload()),
        ("Ball", "SetBallColor", "red")
    );
    assert_eq!(
        (calls[1].target(), calls[1].method(), calls[1].payload()),
        ("Ball", "SetBallColor", "blue")
    );
}

#[tokio::test]
async fn load_failure_preserves_queue_for_next_attempt() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());

    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    bridge.send("Ball", "SetBallColor", "blue").await.unwrap();

    loader.fail_next.store(true, Ordering::SeqCst);
    let err = bridge.show().await.unwrap_err();
    assert_eq!(err.as_label(), "load_failure");
    assert_eq!(bridge.state().await, BridgeState::Unloaded);
    assert_eq!(bridge.pending().await, 2);

    // The next attempt succeeds and flushes the preserved calls.
    bridge.show().await.unwrap();
    loader.signal_ready().await;
    assert_eq!(loader.runtime().payloads(), ["red", "blue"]);
    assert_eq!(bridge.pending().await, 0);
}

#[tokio::test]
async fn delegate_receives_messages_immediately() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    let delegate = Arc::new(RecordingDelegate {
        messages: Mutex::new(Vec::new()),
    });
    bridge.set_delegate(delegate.clone()).await;

    show_until_ready(&bridge, &loader).await;
    let listener = loader.listener();

    listener.message("button pressed").await;
    assert_eq!(
        delegate.messages.lock().unwrap().as_slice(),
        ["button pressed"]
    );

    // Messages from a dead session are dropped.
    listener.unloaded().await;
    listener.message("stale").await;
    assert_eq!(delegate.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dispatch_rejection_drops_the_call() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let runtime = loader.runtime();

    runtime.reject_dispatch.store(true, Ordering::SeqCst);
    // Fire-and-forget: the rejection is swallowed, the call is gone.
    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    assert!(runtime.payloads().is_empty());
    assert_eq!(bridge.pending().await, 0);

    // The dropped call is not retried later.
    runtime.reject_dispatch.store(false, Ordering::SeqCst);
    bridge.send("Ball", "SetBallColor", "blue").await.unwrap();
    assert_eq!(runtime.payloads(), ["blue"]);
}

#[tokio::test]
async fn bounded_queue_rejects_overflow() {
    let cfg = BridgeConfig {
        max_pending: 2,
        ..BridgeConfig::default()
    };
    let (bridge, _loader, _surface) = harness(cfg);

    bridge.send("Ball", "A", "1").await.unwrap();
    bridge.send("Ball", "B", "2").await.unwrap();
    let err = bridge.send("Ball", "C", "3").await.unwrap_err();
    assert!(matches!(err, BridgeError::QueueOverflow { capacity: 2 }));
    assert_eq!(bridge.pending().await, 2);
}

#[tokio::test]
async fn stale_signals_after_unload_are_ignored() {
    let (bridge, loader, surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let old_listener = loader.listener();

    old_listener.unloaded().await;
    assert_eq!(bridge.state().await, BridgeState::Unloaded);

    // The dead session keeps talking; the bridge must not move.
    old_listener.ready().await;
    old_listener.unloaded().await;
    assert_eq!(bridge.state().await, BridgeState::Unloaded);
    assert_eq!(surface.visible.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reload_after_unload_uses_a_fresh_session() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let first = loader.runtime();

    loader.listener().unloaded().await;
    assert_eq!(bridge.state().await, BridgeState::Unloaded);

    bridge.send("Ball", "SetBallColor", "green").await.unwrap();
    bridge.show().await.unwrap();
    loader.signal_ready().await;

    let second = loader.runtime();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.payloads(), ["green"]);
    assert!(first.payloads().is_empty());
    assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn show_when_ready_presents_the_session() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let runtime = loader.runtime();

    bridge.show().await.unwrap();
    assert_eq!(runtime.presented.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.state().await, BridgeState::Ready);

    bridge.show().await.unwrap();
    assert_eq!(runtime.presented.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn show_when_ready_flushes_residual_queue() {
    let (bridge, loader, _surface) = harness(BridgeConfig::default());
    show_until_ready(&bridge, &loader).await;
    let runtime = loader.runtime();

    // An inconsistent session (claims Ready, handle says not ready) leaves a
    // residual call in the queue.
    runtime.ready.store(false, Ordering::SeqCst);
    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    assert_eq!(bridge.pending().await, 1);

    // show() at Ready presents and sweeps the residual call out.
    runtime.ready.store(true, Ordering::SeqCst);
    bridge.show().await.unwrap();
    assert_eq!(bridge.pending().await, 0);
    assert_eq!(runtime.payloads(), ["red"]);
    assert_eq!(runtime.presented.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.state().await, BridgeState::Ready);
}

/// Loader that signals readiness while `load` is still running, before the
/// bridge has the handle in hand.
struct EagerLoader {
    runtime: Mutex<Option<Arc<FakeRuntime>>>,
}

#[async_trait]
impl RuntimeLoader for EagerLoader {
    async fn load(&self, listener: BridgeListener) -> Result<RuntimeRef, BridgeError> {
        listener.ready().await;
        let runtime = FakeRuntime::new();
        runtime.ready.store(true, Ordering::SeqCst);
        *self.runtime.lock().unwrap() = Some(Arc::clone(&runtime));
        Ok(runtime)
    }
}

#[tokio::test]
async fn ready_signal_during_load_is_replayed_after_commit() {
    let loader = Arc::new(EagerLoader {
        runtime: Mutex::new(None),
    });
    let surface = Arc::new(FakeSurface {
        visible: AtomicUsize::new(0),
    });
    let bridge = RuntimeBridge::new(
        BridgeConfig::default(),
        Arc::clone(&loader) as Arc<dyn RuntimeLoader>,
        surface as Arc<dyn HostSurface>,
        Vec::new(),
    );

    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    bridge.show().await.unwrap();

    // The early signal was parked and replayed: the bridge reached Ready and
    // flushed the buffered call instead of hanging in Loading.
    assert_eq!(bridge.state().await, BridgeState::Ready);
    assert_eq!(bridge.pending().await, 0);
    let runtime = loader.runtime.lock().unwrap().clone().unwrap();
    assert_eq!(runtime.payloads(), ["red"]);
}

#[tokio::test]
async fn subscribers_observe_the_lifecycle() {
    let recorder = Arc::new(RecordingSubscriber {
        kinds: Mutex::new(Vec::new()),
    });
    let loader = FakeLoader::new();
    let surface = Arc::new(FakeSurface {
        visible: AtomicUsize::new(0),
    });
    let bridge = RuntimeBridge::new(
        BridgeConfig::default(),
        Arc::clone(&loader) as Arc<dyn RuntimeLoader>,
        surface as Arc<dyn HostSurface>,
        vec![recorder.clone() as Arc<dyn Subscribe>],
    );

    bridge.send("Ball", "SetBallColor", "red").await.unwrap();
    bridge.show().await.unwrap();
    loader.signal_ready().await;
    loader.listener().unloaded().await;

    // Fan-out is asynchronous; give the worker a moment to drain.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let kinds = recorder.kinds.lock().unwrap().clone();
    for expected in [
        EventKind::CallQueued,
        EventKind::LoadRequested,
        EventKind::RuntimeReady,
        EventKind::CallDispatched,
        EventKind::QueueFlushed,
        EventKind::RuntimeUnloaded,
    ] {
        assert!(
            kinds.contains(&expected),
            "missing {expected:?} in {kinds:?}"
        );
    }
}
