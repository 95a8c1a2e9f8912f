//! Callback Invocation Rendering
//!
//! The host answers a script call by evaluating a single statement in the
//! script engine:
//!
//! ```text
//! lantern.callback("<id>", <result|null>, <error|null>);
//! ```
//!
//! Exactly one of result/error is set, or neither for a void success. The
//! result travels as pre-serialized JSON text so the script side parses it
//! natively; the id and error are JSON-encoded into the statement so that
//! quotes or backslashes in them cannot break out of the script literal.

use serde::Serialize;

/// Name of the script-side global object carrying the correlation entry
/// point (`lantern.callback`) and the proxied method calls.
pub const SCRIPT_GLOBAL: &str = "lantern";

/// A correlated reply ready to be delivered into the script engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackInvocation {
    callback_id: String,
    /// Pre-serialized JSON text of the handler result
    result: Option<String>,
    error: Option<String>,
}

impl CallbackInvocation {
    /// Creates a success reply carrying an already-serialized JSON result.
    pub fn success(callback_id: impl Into<String>, result_json: String) -> Self {
        Self {
            callback_id: callback_id.into(),
            result: Some(result_json),
            error: None,
        }
    }

    /// Creates a void success reply (`result` and `error` both null).
    pub fn void(callback_id: impl Into<String>) -> Self {
        Self {
            callback_id: callback_id.into(),
            result: None,
            error: None,
        }
    }

    /// Creates an error reply.
    pub fn failure(callback_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            callback_id: callback_id.into(),
            result: None,
            error: Some(message.into()),
        }
    }

    /// The correlation id this reply answers, verbatim from the request.
    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result_json(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Renders the script statement that settles the pending call.
    pub fn to_script(&self) -> String {
        let id = encode_js_string(&self.callback_id);
        let result = self.result.as_deref().unwrap_or("null");
        let error = match &self.error {
            Some(message) => encode_js_string(message),
            None => "null".to_string(),
        };
        format!("{SCRIPT_GLOBAL}.callback({id}, {result}, {error});")
    }
}

/// JSON-encodes a string for safe embedding in a script statement.
fn encode_js_string(value: &impl Serialize) -> String {
    // String serialization only fails on non-UTF-8 writer errors, which
    // cannot happen when writing to a String.
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_script_embeds_raw_json() {
        let invocation = CallbackInvocation::success("cb_1", r#"{"x":1}"#.to_string());
        assert_eq!(
            invocation.to_script(),
            r#"lantern.callback("cb_1", {"x":1}, null);"#
        );
        assert!(!invocation.is_error());
    }

    #[test]
    fn test_void_script_sends_double_null() {
        let invocation = CallbackInvocation::void("cb_2");
        assert_eq!(invocation.to_script(), r#"lantern.callback("cb_2", null, null);"#);
        assert!(invocation.result_json().is_none());
        assert!(invocation.error_message().is_none());
    }

    #[test]
    fn test_failure_script_encodes_message() {
        let invocation = CallbackInvocation::failure("cb_3", "Method probe not implemented");
        assert_eq!(
            invocation.to_script(),
            r#"lantern.callback("cb_3", null, "Method probe not implemented");"#
        );
        assert!(invocation.is_error());
    }

    #[test]
    fn test_quotes_in_id_and_error_cannot_escape_the_statement() {
        let invocation = CallbackInvocation::failure("cb\"4", "broke \"badly\"\n");
        assert_eq!(
            invocation.to_script(),
            r#"lantern.callback("cb\"4", null, "broke \"badly\"\n");"#
        );
    }

    #[test]
    fn test_callback_id_is_preserved_verbatim() {
        let invocation = CallbackInvocation::void("cb_0042");
        assert_eq!(invocation.callback_id(), "cb_0042");
    }
}
