//! # Demo: embedded_engine
//!
//! Simulates a host application embedding a slow-starting engine view.
//!
//! Shows how to:
//! - Implement the [`RuntimeLoader`] / [`SubRuntime`] / [`HostSurface`] seams.
//! - Buffer calls with [`RuntimeBridge::send`] before the engine is ready.
//! - Watch the lifecycle through the built-in [`LogWriter`] subscriber.
//!
//! ## Flow
//! ```text
//! send("Ball", "SetBallColor", "red")   ──► buffered (engine unloaded)
//! send("Ball", "SetBallColor", "blue")  ──► buffered
//! show() ──► loader builds a session ──► session starts (300ms)
//!         └─► listener.ready() ──► flush: red, then blue
//! session sends "level finished" ──► HostDelegate
//! session unloads ──► queue cleared, host window visible again
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example embedded_engine --features logging
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use runbridge::{
    BridgeConfig, BridgeError, BridgeListener, HostDelegate, HostSurface, LogWriter,
    OutboundCall, RuntimeBridge, RuntimeLoader, RuntimeRef, SubRuntime, Subscribe,
};

/// A pretend engine session: takes 300ms to become ready, prints every call
/// it receives, and pushes one message back to the host.
struct SimulatedEngine {
    listener: BridgeListener,
    ready: AtomicBool,
}

#[async_trait]
impl SubRuntime for SimulatedEngine {
    async fn start(&self) -> Result<(), BridgeError> {
        let listener = self.listener.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(300)).await;
            listener.ready().await;
            listener.message("engine booted").await;
        });
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn present(&self) {
        println!("(engine) view in foreground");
    }

    async fn dispatch(&self, call: &OutboundCall) -> Result<(), BridgeError> {
        println!("(engine) <- {call}");
        Ok(())
    }

    async fn stop(&self) {
        println!("(engine) stopped");
    }
}

struct SimulatedLoader;

#[async_trait]
impl RuntimeLoader for SimulatedLoader {
    async fn load(&self, listener: BridgeListener) -> Result<RuntimeRef, BridgeError> {
        println!("(loader) building engine session");
        let engine = Arc::new(SimulatedEngine {
            listener,
            ready: AtomicBool::new(true),
        });
        Ok(engine)
    }
}

struct MainWindow;

#[async_trait]
impl HostSurface for MainWindow {
    async fn make_visible(&self) {
        println!("(host) main window visible again");
    }
}

struct Host;

#[async_trait]
impl HostDelegate for Host {
    async fn on_runtime_message(&self, message: &str) {
        println!("(host) engine says: {message}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BridgeError> {
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let bridge = RuntimeBridge::new(
        BridgeConfig::default(),
        Arc::new(SimulatedLoader),
        Arc::new(MainWindow),
        subscribers,
    );
    bridge.set_delegate(Arc::new(Host)).await;

    // Produced before the engine exists: both calls buffer.
    bridge.send("Ball", "SetBallColor", "red").await?;
    bridge.send("Ball", "SetBallColor", "blue").await?;

    // Load on demand; the buffered calls flush the moment the session is ready.
    bridge.show().await?;
    sleep(Duration::from_millis(500)).await;

    // Live session: this one dispatches immediately.
    bridge.send("Ball", "SetBallColor", "green").await?;
    sleep(Duration::from_millis(100)).await;

    Ok(())
}
