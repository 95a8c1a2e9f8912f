//! Script-Side Proxy Source
//!
//! The proxy is a user script the dispatcher installs into the rendering
//! surface before any page script runs. It exposes every registered host
//! method as a promise-returning function without declaring each one: a
//! `Proxy` turns any property access (other than `callback` and the
//! underscore-prefixed internals) into a call through the matching message
//! channel.
//!
//! Correlation state lives entirely on this side: a `Map` from callback id
//! to the pending `{resolve, reject}` pair, keyed by ids of the form
//! `cb_<n>` from a monotonically increasing counter. An entry is created
//! when a call is issued and deleted the first time its callback arrives;
//! a callback for an unknown or already-settled id is ignored. There is no
//! expiry: a call the host never answers keeps its entry forever.
//!
//! Calling a method with no registered channel rejects immediately in the
//! engine; no message reaches the host.

/// Script-side name of the channel table the surface populates. The proxy
/// posts `{callbackId, args}` to `__lantern_channels[<method>]`.
pub const CHANNEL_TABLE_GLOBAL: &str = "__lantern_channels";

/// The injected user script installing the `lantern` global.
pub const PROXY_SCRIPT: &str = r#"
const lantern = new Proxy({
    _callbacks: new Map(),
    _nextCallbackId: 0,

    _generateCallbackId: function() {
        return 'cb_' + this._nextCallbackId++;
    },

    _call: function(methodName, ...args) {
        return new Promise((resolve, reject) => {
            const channels = globalThis.__lantern_channels;
            if (channels && channels[methodName]) {
                const callbackId = this._generateCallbackId();
                this._callbacks.set(callbackId, { resolve: resolve, reject: reject });
                channels[methodName].postMessage({
                    callbackId: callbackId,
                    args: args
                });
            } else {
                reject(new Error('Method ' + methodName + ' is not available'));
            }
        });
    },

    callback: function(callbackId, result, error) {
        if (this._callbacks.has(callbackId)) {
            const { resolve, reject } = this._callbacks.get(callbackId);
            if (error) {
                reject(new Error(error));
            } else {
                resolve(result);
            }
            this._callbacks.delete(callbackId);
        }
    }
}, {
    get: function(target, property, receiver) {
        if (typeof property === 'string' && property !== 'callback' && !property.startsWith('_')) {
            return function(...args) {
                return target._call(property, ...args);
            };
        }
        return Reflect.get(target, property, receiver);
    }
});

globalThis.lantern = lantern;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_common::SCRIPT_GLOBAL;

    #[test]
    fn test_proxy_installs_the_protocol_global() {
        assert!(PROXY_SCRIPT.contains(&format!("globalThis.{SCRIPT_GLOBAL} = ")));
        assert!(PROXY_SCRIPT.contains(&format!("globalThis.{CHANNEL_TABLE_GLOBAL}")));
    }

    #[test]
    fn test_callback_ids_use_the_counter_scheme() {
        assert!(PROXY_SCRIPT.contains("'cb_' + this._nextCallbackId++"));
    }
}
