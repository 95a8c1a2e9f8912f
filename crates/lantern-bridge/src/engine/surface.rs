//! Headless Boa Surface
//!
//! [`BoaSurface`] is a rendering surface without any rendering: a Boa
//! `Context` wired up so the bridge can treat it exactly like a webview.
//! The demo binary and the end-to-end tests run on it; a production shell
//! substitutes its real webview behind the same [`ScriptHost`] trait.
//!
//! Channels are engine-side state. `register_channel` installs an object in
//! `__lantern_channels` whose `postMessage` appends `{method, body}` to an
//! outbox array; the host drains that array after evaluations and feeds the
//! messages to the bridge. This mirrors how a platform webview queues script
//! messages for native delivery, and it keeps the whole exchange on a single
//! thread: the engine never calls back into host code mid-evaluation.
//!
//! Promise jobs are run after every evaluation so settlements triggered by a
//! delivered callback propagate before control returns to the host.

use boa_engine::{Context, Source};
use lantern_common::{ChannelMessage, LanternError, Result};
use serde_json::Value;

use crate::engine::conversions::js_value_to_json;
use crate::surface::ScriptHost;

const BOOTSTRAP_SCRIPT: &str = "\
globalThis.__lantern_channels = {};\n\
globalThis.__lantern_outbox = [];\n";

const DRAIN_SCRIPT: &str =
    "globalThis.__lantern_outbox.splice(0, globalThis.__lantern_outbox.length)";

/// A headless script surface backed by the Boa engine.
///
/// Not `Send`: the engine has thread-local state, and the bridge protocol is
/// single-threaded by design. Create, attach and drive it on one thread.
pub struct BoaSurface {
    ctx: Context,
}

impl BoaSurface {
    pub fn new() -> Result<Self> {
        let mut ctx = Context::default();
        ctx.eval(Source::from_bytes(BOOTSTRAP_SCRIPT))
            .map_err(|e| LanternError::ScriptExecution(format!("surface bootstrap failed: {e}")))?;
        Ok(Self { ctx })
    }

    /// Evaluates script and converts the completion value to JSON.
    ///
    /// Used by hosts that want to read engine state back out (the demo
    /// binary reads `globalThis.result` this way).
    pub fn eval_value(&mut self, source: &str) -> Result<Value> {
        let value = self
            .ctx
            .eval(Source::from_bytes(source))
            .map_err(|e| LanternError::ScriptExecution(e.to_string()))?;
        let _ = self.ctx.run_jobs();
        js_value_to_json(value, &mut self.ctx)
    }
}

impl ScriptHost for BoaSurface {
    fn register_channel(&mut self, name: &str) -> Result<()> {
        let name_json = serde_json::to_string(name)?;
        let script = format!(
            "globalThis.__lantern_channels[{name_json}] = {{ \
             postMessage: function(body) {{ \
             globalThis.__lantern_outbox.push({{ method: {name_json}, body: body }}); \
             }} }};"
        );
        self.eval(&script)
    }

    fn eval(&mut self, source: &str) -> Result<()> {
        self.ctx
            .eval(Source::from_bytes(source))
            .map_err(|e| LanternError::ScriptExecution(e.to_string()))?;
        let _ = self.ctx.run_jobs();
        Ok(())
    }

    fn drain_messages(&mut self) -> Vec<ChannelMessage> {
        let drained = match self.ctx.eval(Source::from_bytes(DRAIN_SCRIPT)) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to drain surface outbox: {e}");
                return Vec::new();
            }
        };

        let json = match js_value_to_json(drained, &mut self.ctx) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to convert outbox contents: {e}");
                return Vec::new();
            }
        };

        let Value::Array(items) = json else {
            return Vec::new();
        };

        items
            .into_iter()
            .filter_map(|item| {
                let method = item.get("method")?.as_str()?.to_string();
                let body = item.get("body").cloned().unwrap_or(Value::Null);
                Some(ChannelMessage::new(method, body))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bootstrap_creates_channel_table_and_outbox() {
        let mut surface = BoaSurface::new().unwrap();
        let value = surface
            .eval_value("typeof globalThis.__lantern_channels + '/' + typeof globalThis.__lantern_outbox")
            .unwrap();
        assert_eq!(value, json!("object/object"));
    }

    #[test]
    fn test_registered_channel_queues_messages() {
        let mut surface = BoaSurface::new().unwrap();
        surface.register_channel("probe").unwrap();
        surface
            .eval("globalThis.__lantern_channels['probe'].postMessage({callbackId: 'cb_0', args: [1]});")
            .unwrap();

        let messages = surface.drain_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].method, "probe");
        assert_eq!(messages[0].body, json!({"callbackId": "cb_0", "args": [1]}));

        // drained means drained
        assert!(surface.drain_messages().is_empty());
    }

    #[test]
    fn test_drain_preserves_posting_order() {
        let mut surface = BoaSurface::new().unwrap();
        surface.register_channel("a").unwrap();
        surface.register_channel("b").unwrap();
        surface
            .eval(
                "globalThis.__lantern_channels['a'].postMessage({callbackId: 'cb_0', args: []});\n\
                 globalThis.__lantern_channels['b'].postMessage({callbackId: 'cb_1', args: []});",
            )
            .unwrap();

        let methods: Vec<_> = surface
            .drain_messages()
            .into_iter()
            .map(|m| m.method)
            .collect();
        assert_eq!(methods, vec!["a", "b"]);
    }

    #[test]
    fn test_eval_error_is_reported() {
        let mut surface = BoaSurface::new().unwrap();
        assert!(surface.eval("this is not javascript").is_err());
    }

    #[test]
    fn test_channel_name_with_quotes_is_safely_encoded() {
        let mut surface = BoaSurface::new().unwrap();
        surface.register_channel("we\"ird").unwrap();
        let value = surface
            .eval_value("typeof globalThis.__lantern_channels['we\"ird']")
            .unwrap();
        assert_eq!(value, json!("object"));
    }
}
