//! Socket Lifecycle and the Serve Loop
//!
//! A [`StaticServer`] owns its listener and document root; the lifecycle is
//! construct → bind → serve, with no process-wide state. The serve loop
//! accepts one connection at a time and handles it to completion before
//! accepting the next; a slow client stalls later clients, which is an
//! accepted property of this server, not an oversight. Exactly one request
//! is answered per connection and the socket is then closed.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lantern_common::{LanternError, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::config::{ServerConfig, FALLBACK_PORT, PORT_PROBE_END, PORT_PROBE_START};
use crate::mime;
use crate::request::{self, MAX_REQUEST_BYTES};

/// Listen backlog for the bound socket.
const MAX_PENDING_CONNECTIONS: u32 = 10;

/// Pause before retrying a failed accept.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Static file server bound to a local port.
pub struct StaticServer {
    listener: TcpListener,
    document_root: PathBuf,
}

impl StaticServer {
    /// Binds the server socket.
    ///
    /// With port `0`, candidate ports are probed in ascending order and the
    /// first that binds is used (released, then rebound for real; a probe
    /// race is possible and surfaces as a bind error here). The document
    /// root must exist; it is canonicalized once so later path containment
    /// checks compare like with like.
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let document_root = config.document_root.canonicalize().map_err(|e| {
            LanternError::InvalidConfig(format!(
                "document root {}: {}",
                config.document_root.display(),
                e
            ))
        })?;
        if !document_root.is_dir() {
            return Err(LanternError::InvalidConfig(format!(
                "document root {} is not a directory",
                document_root.display()
            )));
        }

        let port = if config.port == 0 {
            probe_available_port()
        } else {
            config.port
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = bind_with_reuse(addr)
            .map_err(|e| LanternError::Connection(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!(
            "static server listening on {}",
            listener
                .local_addr()
                .map_err(|e| LanternError::Connection(format!("Failed to get local addr: {e}")))?
        );

        Ok(Self {
            listener,
            document_root,
        })
    }

    /// The actually bound address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| LanternError::Connection(format!("Failed to get local addr: {e}")))
    }

    /// Runs the accept loop forever.
    ///
    /// Connections are handled strictly sequentially. A failed accept is
    /// logged and retried after a short delay; a failed exchange aborts
    /// only that connection.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    tracing::debug!(%peer_addr, "connection accepted");
                    if let Err(e) = handle_connection(stream, &self.document_root).await {
                        tracing::error!("connection error: {e}");
                    }
                }
                Err(e) => {
                    tracing::error!("failed to accept connection: {e}");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            }
        }
    }

    /// Moves the serve loop onto a dedicated background task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// Binds a listener with address reuse enabled.
fn bind_with_reuse(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(MAX_PENDING_CONNECTIONS)
}

/// Probes the candidate range for the first bindable port.
///
/// The probe socket is dropped immediately so the real listener can take
/// the port. Falls back to [`FALLBACK_PORT`] when the whole range is busy.
fn probe_available_port() -> u16 {
    for port in PORT_PROBE_START..=PORT_PROBE_END {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let Ok(socket) = TcpSocket::new_v4() else {
            continue;
        };
        if socket.set_reuseaddr(true).is_err() {
            continue;
        }
        if socket.bind(addr).is_ok() {
            tracing::info!("selected available port {port}");
            return port;
        }
    }

    tracing::warn!(
        "no available port in {PORT_PROBE_START}..={PORT_PROBE_END}, falling back to {FALLBACK_PORT}"
    );
    FALLBACK_PORT
}

/// Serves one request on an accepted connection, then closes it.
async fn handle_connection(mut stream: TcpStream, document_root: &Path) -> Result<()> {
    let raw = read_request(&mut stream).await?;

    let Some(path) = request::extract_path(&raw) else {
        tracing::warn!("unparseable request, responding 404");
        return write_not_found(&mut stream).await;
    };
    tracing::debug!(%path, "request");

    match resolve_under_root(document_root, &path) {
        Some(file_path) => match tokio::fs::read(&file_path).await {
            Ok(bytes) => write_file(&mut stream, &file_path, &bytes).await,
            Err(e) => {
                tracing::debug!("cannot read {}: {e}", file_path.display());
                write_not_found(&mut stream).await
            }
        },
        None => write_not_found(&mut stream).await,
    }
}

/// Reads request bytes until the header terminator, EOF, or the size cap.
async fn read_request(stream: &mut TcpStream) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|e| LanternError::Connection(format!("Failed to read request: {e}")))?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() >= MAX_REQUEST_BYTES {
            break;
        }
    }

    if buf.is_empty() {
        return Err(LanternError::Connection(
            "connection closed before a request arrived".into(),
        ));
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Resolves a request path against the document root.
///
/// Returns `None` for missing files and for paths that escape the root
/// after canonicalization (`..` or symlinks out of the tree).
fn resolve_under_root(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let resolved = root.join(relative).canonicalize().ok()?;

    if resolved.starts_with(root) {
        Some(resolved)
    } else {
        tracing::warn!(
            "rejecting path escaping the document root: {}",
            request_path
        );
        None
    }
}

async fn write_file(stream: &mut TcpStream, path: &Path, bytes: &[u8]) -> Result<()> {
    let content_type = mime::content_type_for(path);
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\r\n",
        bytes.len()
    );

    stream
        .write_all(header.as_bytes())
        .await
        .map_err(|e| LanternError::Connection(format!("Failed to send response header: {e}")))?;
    stream
        .write_all(bytes)
        .await
        .map_err(|e| LanternError::Connection(format!("Failed to send response body: {e}")))?;
    Ok(())
}

async fn write_not_found(stream: &mut TcpStream) -> Result<()> {
    stream
        .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n")
        .await
        .map_err(|e| LanternError::Connection(format!("Failed to send response: {e}")))
}
