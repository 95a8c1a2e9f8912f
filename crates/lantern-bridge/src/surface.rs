//! Rendering Surface Abstraction
//!
//! The bridge drives a rendering surface through this trait instead of a
//! concrete webview type. A surface must be able to install a named message
//! channel (so script can address a method), evaluate script text, and hand
//! the host whatever the script side has posted since the last drain.
//!
//! [`BoaSurface`](crate::engine::BoaSurface) is the in-repo implementation,
//! backed by an embedded engine. A production shell wraps its real webview:
//! `register_channel` maps onto the platform's script message handler
//! mechanism, `eval` onto script evaluation, and inbound handler messages
//! are queued until the bridge drains them.

use lantern_common::{ChannelMessage, Result};

/// What the bridge requires from a rendering surface.
pub trait ScriptHost {
    /// Installs a message channel under `name`, making
    /// `__lantern_channels[name].postMessage(body)` reachable from script.
    ///
    /// All channels are registered before the proxy script is evaluated, so
    /// page script can never observe a half-registered method set.
    fn register_channel(&mut self, name: &str) -> Result<()>;

    /// Evaluates script text in the surface.
    ///
    /// An error means the script failed or the surface is gone; the bridge
    /// logs and drops the delivery rather than retrying.
    fn eval(&mut self, source: &str) -> Result<()>;

    /// Returns the channel messages posted since the last drain, oldest
    /// first, clearing the queue.
    fn drain_messages(&mut self) -> Vec<ChannelMessage>;
}
