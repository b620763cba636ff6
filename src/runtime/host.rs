//! # Host-side collaborators.
//!
//! Two seams the bridge calls **out** to on the host side:
//!
//! - [`HostSurface`] — the presentation surface that regains control when the
//!   sub-runtime unloads (the `makeKeyAndVisible` moment).
//! - [`HostDelegate`] — the reverse channel: messages the sub-runtime sends
//!   to the host. Always delivered immediately; never queued, because a
//!   message can only originate from a live, ready session.

use async_trait::async_trait;

/// Host presentation surface.
///
/// The bridge calls [`HostSurface::make_visible`] after releasing an unloaded
/// session, handing presentation control back to the host.
#[async_trait]
pub trait HostSurface: Send + Sync + 'static {
    /// Brings the host's own view back to the foreground.
    async fn make_visible(&self);
}

/// Receiver for messages from the sub-runtime.
///
/// Registered on the bridge via
/// [`RuntimeBridge::set_delegate`](crate::RuntimeBridge::set_delegate);
/// registration replaces any previous delegate, so a message is delivered at
/// most once.
#[async_trait]
pub trait HostDelegate: Send + Sync + 'static {
    /// Called for every message the sub-runtime sends to the host.
    async fn on_runtime_message(&self, message: &str);
}
