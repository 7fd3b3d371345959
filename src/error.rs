//! Error types shared across the server.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while serving a connection.
///
/// Most of these never reach the client as-is: handler, file and
/// serialization failures are folded into a 500 response, traversal attempts
/// into a 400. Only [`Error::Socket`] aborts a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// A user handler returned an error or panicked.
    #[error("handler failed: {0}")]
    Handler(String),

    /// A static-file candidate resolved outside its mount root.
    #[error("path escapes static root: {request_path}")]
    PathTraversal { request_path: String },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("socket error: {0}")]
    Socket(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
