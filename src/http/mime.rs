//! MIME type detection based on file extensions.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guesses a `Content-Type` from the extension of `path`.
///
/// ```
/// # use warden::http::mime;
/// assert_eq!(mime::from_path("public/index.html"), "text/html");
/// assert_eq!(mime::from_path("archive.tar.zst"), "application/octet-stream");
/// ```
pub fn from_path(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => OCTET_STREAM,
    }
}
