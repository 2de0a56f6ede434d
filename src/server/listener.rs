use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::HttpError;
use crate::http::connection::Connection;
use crate::http::router::Router;

/// Binds the listening socket with address reuse and the configured backlog.
pub fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {:?}", cfg.listen_addr))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("failed to bind {}", addr))?;

    Ok(socket.listen(cfg.backlog)?)
}

/// Accepts connections forever, one task per connection.
///
/// The router must be fully populated before this is called.
pub async fn run(cfg: &Config, router: Router) -> anyhow::Result<()> {
    let listener = bind(cfg)?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, Arc::new(router), cfg.slow_response_threshold_us).await
}

/// Logs a failed accept (EMFILE, ECONNABORTED, ...) so the loop can move on
/// to the next connection.
pub fn accepted_or_log<T>(result: std::io::Result<T>) -> Option<T> {
    match result {
        Ok(conn) => Some(conn),
        Err(e) => {
            error!(error = %e, "Accept failed");
            None
        }
    }
}

/// Runs the accept loop on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    slow_response_threshold_us: u64,
) -> anyhow::Result<()> {
    let mut accepted: u64 = 0;

    loop {
        let Some((socket, peer)) = accepted_or_log(listener.accept().await) else {
            continue;
        };
        accepted += 1;
        info!(%peer, accepted, "Accepted connection");

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let start = Instant::now();
            let result = Connection::new(socket, router).run().await;
            let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

            match result {
                Ok(status) => {
                    if elapsed_us > slow_response_threshold_us {
                        warn!(%peer, status, elapsed_us, "Slow response");
                    }
                }
                Err(HttpError::ClosedBeforeRequest) => {
                    debug!(%peer, "Peer closed before sending a request");
                }
                Err(e) if e.is_client_error() => {
                    warn!(%peer, error = %e, elapsed_us, "Rejected request");
                }
                Err(e) => {
                    error!(%peer, error = %e, elapsed_us, "Connection error");
                }
            }
        });
    }
}
