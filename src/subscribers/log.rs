//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [load-requested]
//! [queued] call=Ball.SetBallColor pending=2
//! [ready] pending=2
//! [dispatched] call=Ball.SetBallColor
//! [flushed] count=2
//! [dispatch-failed] call=Ball.SetBallColor reason="not ready"
//! [unloaded] dropped=0
//! [message] "level finished"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    fn call_of(e: &Event) -> String {
        format!(
            "{}.{}",
            e.target.as_deref().unwrap_or("<unknown>"),
            e.method.as_deref().unwrap_or("<unknown>")
        )
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::LoadRequested => {
                println!("[load-requested]");
            }
            EventKind::LoadFailed => {
                println!(
                    "[load-failed] reason={:?} pending={:?}",
                    e.reason, e.queued
                );
            }
            EventKind::RuntimeReady => {
                println!("[ready] pending={}", e.queued.unwrap_or(0));
            }
            EventKind::CallQueued => {
                println!(
                    "[queued] call={} pending={}",
                    Self::call_of(e),
                    e.queued.unwrap_or(0)
                );
            }
            EventKind::CallDispatched => {
                println!("[dispatched] call={}", Self::call_of(e));
            }
            EventKind::DispatchFailed => {
                println!(
                    "[dispatch-failed] call={} reason={:?}",
                    Self::call_of(e),
                    e.reason
                );
            }
            EventKind::QueueFlushed => {
                println!("[flushed] count={}", e.queued.unwrap_or(0));
            }
            EventKind::QueueDiscarded => {
                println!("[discarded] dropped={}", e.queued.unwrap_or(0));
            }
            EventKind::RuntimeUnloaded => {
                println!("[unloaded]");
            }
            EventKind::MessageReceived => {
                println!("[message] {:?}", e.reason.as_deref().unwrap_or(""));
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] name={:?} reason={:?}", e.target, e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] name={:?}", e.target);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
