//! Extension → Content-Type Table
//!
//! The fixed set of types the embedded surface actually loads. Anything
//! else is served as an opaque byte stream.

use std::ffi::OsStr;
use std::path::Path;

/// Returns the `Content-Type` for a file path, by extension
/// (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
