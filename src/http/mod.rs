//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 server side: one request per connection,
//! request head only, fully buffered responses.
//!
//! # Architecture
//!
//! - **`connection`**: the per-client state machine
//! - **`parser`**: parses a request head out of a byte buffer
//! - **`request`**: request representation and builder
//! - **`response`**: response representation and body helpers
//! - **`writer`**: renders and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingHeaders  │ ← read until "\r\n\r\n"
//!        └──────┬───────┬───┘
//!               │       │ bad request line
//!               ▼       └──────────────┐
//!        ┌──────────────────┐          │
//!        │     Parsed       │ ← route  │
//!        └──────┬───────────┘          │
//!               ▼                      │
//!        ┌──────────────────┐          │
//!        │   Dispatching    │ ← run handler (faults → 500)
//!        └──────┬───────────┘          │
//!               ▼                      ▼
//!        ┌─────────────────────────────────┐
//!        │        WritingResponse          │
//!        └──────┬──────────────────────────┘
//!               │ shutdown + close
//!               ▼
//!        ┌──────────────────┐
//!        │      Closed      │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use warden::http::connection::Connection;
//! use warden::router::RouterBuilder;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Arc::new(RouterBuilder::new().build());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
