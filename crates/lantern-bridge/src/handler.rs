//! Method Handlers and the Dispatch Table
//!
//! Host methods are plain synchronous functions from a decoded call request
//! to an optional JSON result. They are collected once, at bridge
//! construction, into an immutable [`MethodRegistry`]; the set of exposed
//! names never changes afterwards, which is what lets the script-side proxy
//! be installed with its channels already known.
//!
//! Handlers must not block the thread that also evaluates script in the
//! rendering surface, and they must not touch bridge state; they may read
//! host environment data freely.

use std::collections::HashMap;

use lantern_common::CallRequest;
use serde_json::Value;

/// A host method exposed to script code.
///
/// Returning `Some(value)` resolves the pending script promise with that
/// value; returning `None` resolves it as a void success.
pub trait MethodHandler: Send + Sync {
    fn handle(&self, request: &CallRequest) -> Option<Value>;
}

impl<F> MethodHandler for F
where
    F: Fn(&CallRequest) -> Option<Value> + Send + Sync,
{
    fn handle(&self, request: &CallRequest) -> Option<Value> {
        self(request)
    }
}

/// Immutable method-name → handler table.
///
/// Built through [`MethodRegistry::builder`]; registering the same name
/// twice keeps the later handler.
pub struct MethodRegistry {
    handlers: HashMap<String, Box<dyn MethodHandler>>,
}

impl MethodRegistry {
    pub fn builder() -> MethodRegistryBuilder {
        MethodRegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    /// Looks up the handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn MethodHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// The registered method names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder collecting handlers before the table is frozen.
pub struct MethodRegistryBuilder {
    handlers: HashMap<String, Box<dyn MethodHandler>>,
}

impl MethodRegistryBuilder {
    /// Registers `handler` under `name`.
    pub fn method(
        mut self,
        name: impl Into<String>,
        handler: impl MethodHandler + 'static,
    ) -> Self {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_lookup() {
        let registry = MethodRegistry::builder()
            .method("double", |req: &CallRequest| {
                let n = req.arg(0).and_then(Value::as_i64).unwrap_or(0);
                Some(json!(n * 2))
            })
            .build();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("double"));
        assert!(!registry.contains("triple"));

        let request = CallRequest::new("cb_0", vec![json!(21)]);
        let result = registry.get("double").unwrap().handle(&request);
        assert_eq!(result, Some(json!(42)));
    }

    #[test]
    fn test_void_handler_returns_none() {
        let registry = MethodRegistry::builder()
            .method("ping", |_req: &CallRequest| None)
            .build();

        let request = CallRequest::new("cb_0", vec![]);
        assert_eq!(registry.get("ping").unwrap().handle(&request), None);
    }

    #[test]
    fn test_duplicate_registration_keeps_last() {
        let registry = MethodRegistry::builder()
            .method("probe", |_req: &CallRequest| Some(json!("first")))
            .method("probe", |_req: &CallRequest| Some(json!("second")))
            .build();

        let request = CallRequest::new("cb_0", vec![]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("probe").unwrap().handle(&request),
            Some(json!("second"))
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = MethodRegistry::builder().build();
        assert!(registry.is_empty());
        assert_eq!(registry.names().count(), 0);
    }
}
