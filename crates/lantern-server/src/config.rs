//! Server Configuration
//!
//! One instance-owned configuration value, set before bind and immutable
//! afterwards. Port `0` (the default) asks the server to probe the
//! candidate range for the first bindable port.

use std::path::PathBuf;

/// First port tried during auto-selection.
pub const PORT_PROBE_START: u16 = 8000;
/// Last port tried during auto-selection.
pub const PORT_PROBE_END: u16 = 9000;
/// Port used when nothing in the probe range can be bound.
pub const FALLBACK_PORT: u16 = 8080;

/// Static server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory the server is permitted to serve files from
    pub document_root: PathBuf,
    /// Port to bind; `0` selects one automatically
    pub port: u16,
}

impl ServerConfig {
    /// Creates a configuration serving `document_root` on an auto-selected
    /// port.
    pub fn new(document_root: impl Into<PathBuf>) -> Self {
        Self {
            document_root: document_root.into(),
            port: 0,
        }
    }

    /// Requests a specific port instead of auto-selection.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_auto() {
        let config = ServerConfig::new("/srv/site");
        assert_eq!(config.port, 0);
        assert_eq!(config.document_root, PathBuf::from("/srv/site"));
    }

    #[test]
    fn test_with_port_overrides_auto() {
        let config = ServerConfig::new("/srv/site").with_port(8123);
        assert_eq!(config.port, 8123);
    }
}
