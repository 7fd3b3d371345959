//! Warden - embeddable HTTP/1.1 server
//!
//! Core library: request parsing, routing with static mounts, and the
//! one-shot connection state machine.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;

pub use error::{Error, Result};
pub use http::request::{Method, Request};
pub use http::response::Response;
pub use router::{Handler, Router, RouterBuilder};
pub use server::Server;
