use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::http::connection::Connection;
use crate::router::Router;

/// Accepts forever, one task per connection.
///
/// The next accept is issued as soon as the previous one completes; accept
/// errors are logged and do not stop the loop.
pub async fn run(listener: TcpListener, router: Arc<Router>) {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Accept error: {}", e);
                continue;
            }
        };
        info!("New connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router).with_peer(peer);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
