use std::collections::HashMap;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::Error;
use crate::http::mime;
use crate::http::writer::serialize_response;

pub const CONTENT_TYPE: &str = "Content-Type";

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Returns the standard HTTP reason phrase for a status code.
///
/// Codes outside the table render as `"Unknown Status"`.
///
/// # Example
///
/// ```
/// # use warden::http::response::reason_phrase;
/// assert_eq!(reason_phrase(200), "OK");
/// assert_eq!(reason_phrase(404), "Not Found");
/// assert_eq!(reason_phrase(418), "Unknown Status");
/// ```
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        _ => "Unknown Status",
    }
}

/// An HTTP response under construction.
///
/// Handlers receive a `&mut Response` pre-filled with status 200 and
/// `Content-Type: text/plain`, and mutate it in place. `Content-Length` is
/// computed when the response is rendered, so handlers never set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status_code: u16,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "text/plain".to_string());
        Self {
            status_code: 200,
            headers,
            body: Vec::new(),
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&mut self, status_code: u16) -> &mut Self {
        self.status_code = status_code;
        self
    }

    /// Adds or replaces a header.
    pub fn header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(|v| v.as_str())
    }

    /// Sets a plain-text body.
    pub fn text(&mut self, body: impl Into<String>) -> &mut Self {
        self.header(CONTENT_TYPE, "text/plain");
        self.body = body.into().into_bytes();
        self
    }

    /// Sets an HTML body.
    pub fn html(&mut self, body: impl Into<String>) -> &mut Self {
        self.header(CONTENT_TYPE, "text/html");
        self.body = body.into().into_bytes();
        self
    }

    /// Serializes `value` as the JSON body.
    ///
    /// Serialization failures never escape: the response degrades to a
    /// plain-text 500 instead.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> &mut Self {
        match serde_json::to_vec(value) {
            Ok(body) => {
                self.header(CONTENT_TYPE, "application/json");
                self.body = body;
            }
            Err(e) => {
                let err = Error::from(e);
                tracing::error!(error = %err, "JSON serialization failed");
                self.internal_error();
            }
        }
        self
    }

    /// Loads the whole file at `path` into the body.
    ///
    /// On success the status is 200 and the content type is derived from the
    /// extension. On failure the response is already turned into a 404 (file
    /// missing) or 500 (read error) and the error is returned for logging.
    pub fn send_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();

        match std::fs::read(path) {
            Ok(contents) => {
                self.status_code = 200;
                self.header(CONTENT_TYPE, mime::from_path(path));
                self.body = contents;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("File not found: {}", path.display());
                self.status_code = 404;
                self.text(format!("File not found: {}", path.display()));
                Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(source) => {
                tracing::error!("Error reading file {}: {}", path.display(), source);
                self.internal_error();
                Err(Error::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Turns this response into the canonical plain-text 500.
    pub fn internal_error(&mut self) -> &mut Self {
        self.status_code = 500;
        self.text(INTERNAL_ERROR_BODY)
    }

    /// Renders the response in HTTP/1.1 wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_response(self)
    }
}
