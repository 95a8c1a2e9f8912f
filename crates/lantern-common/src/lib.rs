//! Lantern Common Types
//!
//! This crate provides the correlation protocol shared by both sides of the
//! lantern message bridge: the request envelope posted by script code, the
//! callback invocation delivered back by the host, and the common error type.
//!
//! # Overview
//!
//! Lantern embeds a web-rendering surface in a native host process. Script
//! code calls host methods through a proxy object; every call carries a
//! callback id, and the host answers by evaluating a single correlation
//! call back into the script engine. This crate defines that vocabulary:
//!
//! - [`CallRequest`]: the `{callbackId, args}` envelope, tagged with a
//!   method name as a [`ChannelMessage`]
//! - [`CallbackInvocation`]: the `(callbackId, result, error)` reply and
//!   its script rendering
//! - [`LanternError`]: the error enum used across all lantern crates
//!
//! # Example
//!
//! ```
//! use lantern_common::{CallbackInvocation, ChannelMessage, CallRequest};
//! use serde_json::json;
//!
//! let msg = ChannelMessage::new("echo", json!({"callbackId": "cb_0", "args": [1]}));
//! let request = CallRequest::from_body(&msg.body).unwrap();
//! let reply = CallbackInvocation::success(request.callback_id, "[1]".into());
//! assert_eq!(reply.to_script(), "lantern.callback(\"cb_0\", [1], null);");
//! ```

pub mod error;
pub mod protocol;

pub use error::{LanternError, Result};
pub use protocol::{CallRequest, CallbackInvocation, ChannelMessage, SCRIPT_GLOBAL};
