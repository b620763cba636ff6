//! Capability seams around the embedded sub-runtime.
//!
//! The bridge core never touches a real engine; it talks to these traits:
//!
//! - [`SubRuntime`] — one live sub-runtime session (start, present, dispatch,
//!   stop).
//! - [`RuntimeLoader`] — produces a fresh session per load cycle.
//! - [`HostSurface`] — the host presentation surface that regains control on
//!   unload.
//! - [`HostDelegate`] — receives messages the sub-runtime sends back to the
//!   host (the reverse channel; delivered immediately, never buffered).
//!
//! Platform mechanics (bundle/dylib loading, symbol resolution, windowing)
//! live behind implementations of these traits, outside the core.

mod handle;
mod host;
mod loader;

pub use handle::{RuntimeRef, SubRuntime};
pub use host::{HostDelegate, HostSurface};
pub use loader::RuntimeLoader;
