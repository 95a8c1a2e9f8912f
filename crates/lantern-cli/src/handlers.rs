//! Sample Method Handlers
//!
//! The handlers wired into the headless runner. The bridge library treats
//! methods as pluggable; these are the stand-ins a host shell would replace
//! with its real device/platform methods.

use lantern_bridge::MethodRegistry;
use lantern_common::CallRequest;
use serde_json::{json, Value};

pub fn sample_registry() -> MethodRegistry {
    MethodRegistry::builder()
        .method("getHostInfo", |_req: &CallRequest| {
            Some(json!({
                "os": std::env::consts::OS,
                "arch": std::env::consts::ARCH,
                "family": std::env::consts::FAMILY,
            }))
        })
        .method("echo", |req: &CallRequest| {
            Some(req.arg(0).cloned().unwrap_or(Value::Null))
        })
        .method("ping", |_req: &CallRequest| None)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_bridge::MethodHandler;

    #[test]
    fn test_sample_registry_methods() {
        let registry = sample_registry();
        assert!(registry.contains("getHostInfo"));
        assert!(registry.contains("echo"));
        assert!(registry.contains("ping"));

        let request = CallRequest::new("cb_0", vec![json!("hello")]);
        assert_eq!(
            registry.get("echo").unwrap().handle(&request),
            Some(json!("hello"))
        );

        let info = registry
            .get("getHostInfo")
            .unwrap()
            .handle(&CallRequest::new("cb_1", vec![]))
            .unwrap();
        assert_eq!(info["os"], json!(std::env::consts::OS));
    }
}
