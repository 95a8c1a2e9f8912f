//! Host-Side Dispatcher
//!
//! The [`Bridge`] owns the method registry and turns inbound channel
//! messages into correlated callback deliveries. Dispatch itself is a pure
//! function from message to [`CallbackInvocation`]; delivery (evaluating
//! the rendered statement in the surface) is the only side effect, and it
//! is never retried: if the surface has been torn down, the callback is
//! logged and dropped.

use lantern_common::{CallRequest, CallbackInvocation, ChannelMessage};

use crate::handler::MethodRegistry;
use crate::proxy;
use crate::surface::ScriptHost;

/// Host-side dispatcher for the message bridge.
pub struct Bridge {
    registry: MethodRegistry,
}

impl Bridge {
    /// Creates a bridge over a frozen method table.
    pub fn new(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Wires the bridge into a surface.
    ///
    /// Registers every method name as a message channel, then installs the
    /// script-side proxy. Ordering matters: channels exist before the proxy
    /// runs, and the proxy runs before any page script is evaluated, so a
    /// page can never call a method that was not pre-registered.
    pub fn attach<S: ScriptHost>(&self, surface: &mut S) -> lantern_common::Result<()> {
        for name in self.registry.names() {
            surface.register_channel(name)?;
        }
        surface.eval(proxy::PROXY_SCRIPT)?;
        tracing::info!(methods = self.registry.len(), "bridge attached to surface");
        Ok(())
    }

    /// Decodes one channel message and produces the reply to deliver.
    ///
    /// Returns `None` when the body carries no string `callbackId`: the
    /// message cannot be correlated, so it is dropped. Every decodable
    /// message produces exactly one invocation, echoing the id verbatim.
    pub fn dispatch(&self, message: &ChannelMessage) -> Option<CallbackInvocation> {
        let Some(request) = CallRequest::from_body(&message.body) else {
            tracing::warn!(method = %message.method, "dropping message without a callback id");
            return None;
        };

        let invocation = match self.registry.get(&message.method) {
            Some(handler) => match handler.handle(&request) {
                Some(value) => match serde_json::to_string(&value) {
                    Ok(text) => CallbackInvocation::success(request.callback_id, text),
                    Err(e) => CallbackInvocation::failure(
                        request.callback_id,
                        format!("Error serializing result: {e}"),
                    ),
                },
                None => CallbackInvocation::void(request.callback_id),
            },
            None => CallbackInvocation::failure(
                request.callback_id,
                format!("Method {} not implemented", message.method),
            ),
        };

        Some(invocation)
    }

    /// Drains and answers surface messages until none remain.
    ///
    /// Callback delivery runs script, which may issue further calls; the
    /// loop keeps draining until the surface is quiet. Delivery failures
    /// are logged and dropped.
    pub fn pump<S: ScriptHost>(&self, surface: &mut S) {
        loop {
            let messages = surface.drain_messages();
            if messages.is_empty() {
                break;
            }

            for message in messages {
                tracing::debug!(method = %message.method, "bridge message received");
                let Some(invocation) = self.dispatch(&message) else {
                    continue;
                };
                if let Err(e) = surface.eval(&invocation.to_script()) {
                    tracing::warn!(
                        callback_id = %invocation.callback_id(),
                        error = %e,
                        "callback delivery failed, dropping"
                    );
                }
            }
        }
    }
}
