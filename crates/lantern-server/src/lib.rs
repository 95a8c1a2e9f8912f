//! Lantern Static File Server
//!
//! A deliberately minimal HTTP/1.1 file server for the embedded web
//! surface. Web content is served from a document root over a real socket
//! (`http://localhost:<port>/...`) because some navigation and relative-URL
//! behaviors only work under genuine HTTP semantics, not file-scheme loads.
//!
//! # What it does
//!
//! - binds a caller-chosen port, or probes 8000..=9000 for the first free
//!   one (8080 as last resort)
//! - accepts connections sequentially on one background task
//! - parses exactly the `GET <path> HTTP` request shape
//! - answers `200 OK` with `Content-Type`/`Content-Length` and the raw file
//!   bytes, or `404 Not Found`, then closes the connection
//!
//! # What it does not do
//!
//! No HTTPS, no keep-alive, no concurrent connection handling, no verbs
//! other than `GET`, no query strings, no caching or range headers. Paths
//! resolving outside the document root are rejected with `404`.
//!
//! # Example
//!
//! ```no_run
//! use lantern_server::{ServerConfig, StaticServer};
//!
//! #[tokio::main]
//! async fn main() -> lantern_common::Result<()> {
//!     let config = ServerConfig::new("./site");
//!     let server = StaticServer::bind(config).await?;
//!     println!("serving on http://127.0.0.1:{}/", server.local_addr()?.port());
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod mime;
pub mod request;
pub mod server;

pub use config::ServerConfig;
pub use server::StaticServer;
