use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::logging::LoggingConfig;
use crate::router::path::{join, normalize};
use crate::router::static_files::StaticMount;
use crate::router::{Handler, RouteKey, Router};

/// Collects routes, groups and static mounts before serving starts.
///
/// # Example
///
/// ```
/// # use warden::router::RouterBuilder;
/// let mut users = RouterBuilder::new();
/// users.get("/list", |_req, res| {
///     res.json(&["alice", "bob"]);
///     Ok(())
/// });
///
/// let mut app = RouterBuilder::new();
/// app.group("/api", |api| {
///     api.get("/health", |_req, res| {
///         res.text("ok");
///         Ok(())
///     });
/// });
/// app.mount("/api/users", &users);
///
/// let router = app.build();
/// assert!(router.has_route("GET", "/api/health"));
/// assert!(router.has_route("GET", "/api/users/list"));
/// ```
#[derive(Clone, Default)]
pub struct RouterBuilder {
    routes: HashMap<RouteKey, Handler>,
    static_mounts: Vec<StaticMount>,
    // Only meaningful while a `group` closure runs.
    current_group_prefix: String,
    trace_matching: bool,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose compiled router traces every matching step when
    /// `config.debug` is set.
    pub fn with_logging(config: &LoggingConfig) -> Self {
        Self {
            trace_matching: config.debug,
            ..Self::default()
        }
    }

    pub fn get<F>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(Method::GET, path, handler)
    }

    pub fn post<F>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(Method::POST, path, handler)
    }

    pub fn put<F>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(Method::PUT, path, handler)
    }

    pub fn delete<F>(&mut self, path: &str, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.route(Method::DELETE, path, handler)
    }

    /// Registers `handler` for `method` at `path` under the active group
    /// prefix. An existing binding for the same key is replaced.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.insert(method.as_str(), path, Arc::new(handler))
    }

    /// Same as [`RouterBuilder::route`] for an already shared handler.
    pub fn handler(&mut self, method: Method, path: &str, handler: Handler) -> &mut Self {
        self.insert(method.as_str(), path, handler)
    }

    fn insert(&mut self, method: &str, path: &str, handler: Handler) -> &mut Self {
        let full_path = join(&self.current_group_prefix, path);
        info!("Registered route: {} {}", method, full_path);
        self.routes.insert((method.to_string(), full_path), handler);
        self
    }

    /// Serves files below `root` at the URL `prefix`.
    ///
    /// Mounts are tried in registration order, before explicit routes. The
    /// group prefix does not apply to static mounts.
    pub fn serve_static(&mut self, prefix: &str, root: impl Into<PathBuf>) -> &mut Self {
        let mount = StaticMount::new(prefix, root);
        info!(
            "Serving static files from '{}' at URL prefix '{}'",
            mount.root.display(),
            mount.prefix
        );
        self.static_mounts.push(mount);
        self
    }

    /// Runs `configure` with routes prefixed by `prefix`. Groups nest.
    pub fn group<F>(&mut self, prefix: &str, configure: F) -> &mut Self
    where
        F: FnOnce(&mut RouterBuilder),
    {
        let previous = self.current_group_prefix.clone();
        self.current_group_prefix = join(&previous, prefix);
        info!(
            "Entering route group with prefix: {}",
            self.current_group_prefix
        );

        configure(self);

        info!("Exiting route group. Restoring prefix: {}", previous);
        self.current_group_prefix = previous;
        self
    }

    /// Copies every route and static mount of `other` under `prefix`.
    ///
    /// The copy is taken now: anything registered on `other` afterwards is
    /// not visible here.
    pub fn mount(&mut self, prefix: &str, other: &RouterBuilder) -> &mut Self {
        let mount_prefix = normalize(prefix);
        info!("Mounting router at prefix: {}", mount_prefix);

        for ((method, path), handler) in &other.routes {
            let full_path = join(&mount_prefix, path);
            info!("   Mounted route: {} {}", method, full_path);
            self.routes
                .insert((method.clone(), full_path), Arc::clone(handler));
        }

        for mount in &other.static_mounts {
            let full_prefix = join(&mount_prefix, &mount.prefix);
            info!(
                "   Mounted static path: '{}' from '{}' at URL prefix '{}'",
                mount.root.display(),
                mount.prefix,
                full_prefix
            );
            self.static_mounts.push(StaticMount {
                prefix: full_prefix,
                root: mount.root.clone(),
            });
        }

        self
    }

    /// Compiles the collected bindings into a read-only [`Router`].
    pub fn build(&self) -> Router {
        Router::from_parts(
            self.routes.clone(),
            self.static_mounts.clone(),
            self.trace_matching,
        )
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("routes", &self.routes.len())
            .field("static_mounts", &self.static_mounts)
            .field("current_group_prefix", &self.current_group_prefix)
            .finish()
    }
}
