//! Lantern Message Bridge
//!
//! This crate provides the host side of the lantern call bridge: a table of
//! named method handlers, a dispatcher that decodes inbound channel messages
//! and delivers correlated callbacks, and the script-side proxy source that
//! is injected into the rendering surface before any page script runs.
//!
//! # Architecture
//!
//! The bridge is split along the same seam as the protocol:
//!
//! - [`MethodRegistry`]: immutable name to handler table, built once
//! - [`Bridge`]: decodes requests, invokes handlers, renders callbacks
//! - [`ScriptHost`]: what the bridge needs from a rendering surface
//! - [`BoaSurface`]: a headless surface backed by the Boa engine, used by
//!   the demo binary and the end-to-end tests
//!
//! A production shell implements [`ScriptHost`] over its real webview; the
//! bridge itself never assumes a particular surface.
//!
//! # Example
//!
//! ```no_run
//! use lantern_bridge::{Bridge, BoaSurface, MethodRegistry, ScriptHost};
//! use lantern_common::CallRequest;
//! use serde_json::json;
//!
//! let registry = MethodRegistry::builder()
//!     .method("echo", |req: &CallRequest| req.arg(0).cloned())
//!     .build();
//! let bridge = Bridge::new(registry);
//!
//! let mut surface = BoaSurface::new().unwrap();
//! bridge.attach(&mut surface).unwrap();
//! surface.eval("lantern.echo({n: 1});").unwrap();
//! bridge.pump(&mut surface);
//! ```

pub mod dispatch;
pub mod engine;
pub mod handler;
pub mod proxy;
pub mod surface;

pub use dispatch::Bridge;
pub use engine::BoaSurface;
pub use handler::{MethodHandler, MethodRegistry, MethodRegistryBuilder};
pub use surface::ScriptHost;
