//! Request Envelope Types
//!
//! Script code addresses the host through named message channels. Every
//! message carries a body of the shape `{"callbackId": "...", "args": [...]}`;
//! the channel name identifies the method, and the callback id pairs the
//! request with its eventual reply.
//!
//! Callback ids are generated by the script-side proxy as `cb_<n>` from a
//! monotonically increasing counter. The host never invents ids: it echoes
//! back exactly the id it received.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message received from the script engine on a named channel.
///
/// The `method` is the channel name the script posted to; the `body` is the
/// raw structured payload, normally a [`CallRequest`] in JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    /// Name of the channel (and therefore the method) this was posted to
    pub method: String,
    /// Raw message body as posted by the script side
    pub body: Value,
}

impl ChannelMessage {
    pub fn new(method: impl Into<String>, body: Value) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }
}

/// The decoded call envelope: `{"callbackId": "...", "args": [...]}`.
///
/// A message without a string `callbackId` cannot be correlated with a
/// response and is dropped by the dispatcher; [`CallRequest::from_body`]
/// returns `None` for such bodies. Extra fields are ignored and a missing
/// `args` is treated as an empty argument list, matching what handlers
/// actually observe on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Correlation id, unique per in-flight call
    pub callback_id: String,
    /// Positional arguments the script passed to the proxied method
    #[serde(default)]
    pub args: Vec<Value>,
}

impl CallRequest {
    pub fn new(callback_id: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            callback_id: callback_id.into(),
            args,
        }
    }

    /// Decodes a raw message body into a call request.
    ///
    /// Returns `None` when `callbackId` is absent or not a string; there is
    /// no way to answer such a message. A non-array or missing `args` decays
    /// to an empty argument list.
    pub fn from_body(body: &Value) -> Option<Self> {
        let callback_id = body.get("callbackId")?.as_str()?.to_string();
        let args = body
            .get("args")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Some(Self { callback_id, args })
    }

    /// First positional argument, if any.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_decodes_envelope() {
        let body = json!({"callbackId": "cb_3", "args": [1, "two", null]});
        let request = CallRequest::from_body(&body).unwrap();
        assert_eq!(request.callback_id, "cb_3");
        assert_eq!(request.args, vec![json!(1), json!("two"), json!(null)]);
    }

    #[test]
    fn test_from_body_without_callback_id_is_dropped() {
        assert!(CallRequest::from_body(&json!({"args": []})).is_none());
        assert!(CallRequest::from_body(&json!({})).is_none());
        assert!(CallRequest::from_body(&json!(null)).is_none());
        assert!(CallRequest::from_body(&json!("cb_1")).is_none());
    }

    #[test]
    fn test_from_body_requires_string_callback_id() {
        let body = json!({"callbackId": 7, "args": []});
        assert!(CallRequest::from_body(&body).is_none());
    }

    #[test]
    fn test_from_body_defaults_missing_args() {
        let request = CallRequest::from_body(&json!({"callbackId": "cb_0"})).unwrap();
        assert!(request.args.is_empty());

        // a malformed args field decays to empty rather than dropping the call
        let request = CallRequest::from_body(&json!({"callbackId": "cb_0", "args": 5})).unwrap();
        assert!(request.args.is_empty());
    }

    #[test]
    fn test_from_body_ignores_extra_fields() {
        let body = json!({"callbackId": "cb_0", "args": [true], "origin": "page"});
        let request = CallRequest::from_body(&body).unwrap();
        assert_eq!(request.arg(0), Some(&json!(true)));
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let request = CallRequest::new("cb_9", vec![json!(1)]);
        let serialized = serde_json::to_string(&request).unwrap();
        assert!(serialized.contains("\"callbackId\":\"cb_9\""));

        let decoded: CallRequest = serde_json::from_str(&serialized).unwrap();
        assert_eq!(decoded, request);
    }
}
