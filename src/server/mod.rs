//! Listening socket and server lifecycle.

pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Error;
use crate::router::Router;

/// Binds the configured address and serves a compiled [`Router`].
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    router: Arc<Router>,
}

impl Server {
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub async fn bind(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        info!("Server initialized on {}", self.config.listen_addr);
        Ok(listener)
    }

    /// Binds and serves until the task is dropped.
    pub async fn run(self) -> Result<(), Error> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        let addr: SocketAddr = listener.local_addr()?;
        info!("Running on http://{}", addr);

        listener::run(listener, self.router).await;
        Ok(())
    }
}
