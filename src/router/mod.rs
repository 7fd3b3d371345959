//! Request routing.
//!
//! Routes are registered on a [`RouterBuilder`] and compiled into an
//! immutable [`Router`] before serving starts. The compiled router is shared
//! read-only between connection tasks.
//!
//! # Matching order
//!
//! ```text
//!   request ──▶ static mounts (registration order)
//!                 ├─ file found        → serve file
//!                 ├─ escapes the root  → 400 "Invalid path." (stop)
//!                 └─ nothing here      → next mount
//!             ──▶ exact (method, normalized path) route
//!             ──▶ 404 "Not found: <path>"
//! ```

pub mod builder;
pub mod path;
pub mod static_files;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::http::request::Request;
use crate::http::response::Response;

pub use builder::RouterBuilder;
pub use path::normalize;
pub use static_files::{Resolution, StaticMount};

/// A request handler.
///
/// Handlers run synchronously on the connection task. Returning `Err` (or
/// panicking) turns the response into a plain-text 500.
pub type Handler = Arc<dyn Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync>;

/// Route table key: method token and normalized path.
pub(crate) type RouteKey = (String, String);

/// Compiled, read-only routing table.
pub struct Router {
    routes: HashMap<RouteKey, Handler>,
    static_mounts: Vec<StaticMount>,
    trace_matching: bool,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn from_parts(
        routes: HashMap<RouteKey, Handler>,
        static_mounts: Vec<StaticMount>,
        trace_matching: bool,
    ) -> Self {
        Self {
            routes,
            static_mounts,
            trace_matching,
        }
    }

    pub fn static_mounts(&self) -> &[StaticMount] {
        &self.static_mounts
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn has_route(&self, method: &str, path: &str) -> bool {
        self.routes
            .contains_key(&(method.to_string(), normalize(path)))
    }

    /// Picks the handler for `req`. Always returns something: unmatched
    /// requests get a 404 handler.
    pub fn match_request(&self, req: &Request) -> Handler {
        if self.trace_matching {
            debug!("Attempting to match request: {} {}", req.method, req.path);
        }

        // 1. Static mounts
        for mount in &self.static_mounts {
            let Some(sub_path) = mount.sub_path(&req.path) else {
                if self.trace_matching {
                    debug!(
                        "  Request path '{}' does NOT match static prefix '{}'",
                        req.path, mount.prefix
                    );
                }
                continue;
            };

            match mount.resolve(sub_path) {
                Resolution::File(file) => {
                    info!("Serving static file: {}", file.display());
                    return file_handler(file);
                }
                Resolution::Traversal(candidate) => {
                    let err = Error::PathTraversal {
                        request_path: req.path.clone(),
                    };
                    warn!(candidate = %candidate.display(), "{}", err);
                    return invalid_path_handler();
                }
                Resolution::Missing(candidate) => {
                    if self.trace_matching {
                        debug!(
                            "  Static file not found or not a regular file: {}",
                            candidate.display()
                        );
                    }
                }
            }
        }

        // 2. Explicit routes
        let key = (req.method.clone(), normalize(&req.path));
        if let Some(handler) = self.routes.get(&key) {
            info!("Matched explicit route: {} {}", req.method, req.path);
            return Arc::clone(handler);
        }

        if self.trace_matching {
            debug!(" No explicit route found for key: '{} {}'", key.0, key.1);
        }

        // 3. Nothing matched
        info!("Route not found: {} {}", req.method, req.path);
        not_found_handler()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .routes
            .keys()
            .map(|(method, path)| format!("{method} {path}"))
            .collect();
        keys.sort();

        f.debug_struct("Router")
            .field("routes", &keys)
            .field("static_mounts", &self.static_mounts)
            .finish()
    }
}

fn file_handler(file: PathBuf) -> Handler {
    Arc::new(move |_req: &Request, res: &mut Response| -> anyhow::Result<()> {
        // send_file has already shaped the failure response
        if let Err(e) = res.send_file(&file) {
            debug!("Static file could not be sent: {}", e);
        }
        Ok(())
    })
}

fn invalid_path_handler() -> Handler {
    Arc::new(|_req: &Request, res: &mut Response| -> anyhow::Result<()> {
        res.status(400).text("Invalid path.");
        Ok(())
    })
}

fn not_found_handler() -> Handler {
    Arc::new(|req: &Request, res: &mut Response| -> anyhow::Result<()> {
        res.status(404).text(format!("Not found: {}", req.path));
        Ok(())
    })
}
