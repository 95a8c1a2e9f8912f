//! Minimal Request Parsing
//!
//! The server understands exactly one request shape: `GET <path> HTTP...`.
//! Headers, query strings, other verbs and bodies are not interpreted. A
//! request that does not match yields `None`, which the caller answers with
//! `404`.

/// Upper bound on how many request bytes are read before parsing.
pub const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Extracts the request path from raw request text.
///
/// `/` is mapped to `/index.html`, matching how the embedded surface loads
/// its entry page.
pub fn extract_path(request: &str) -> Option<String> {
    let start = request.find("GET ")? + "GET ".len();
    let rest = &request[start..];
    let end = rest.find(" HTTP")?;
    let path = rest[..end].trim();

    if path == "/" {
        Some("/index.html".to_string())
    } else {
        Some(path.to_string())
    }
}
