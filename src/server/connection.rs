// Connection handling
// Accepts TCP connections and serves each one with hyper's HTTP/1 driver.

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept connections forever, one `spawn_local` task per connection.
///
/// Dispatch is single-threaded: the caller runs this inside a `LocalSet` on a
/// current-thread runtime, so middleware order holds per request and nothing
/// here blocks outside framework I/O.
pub async fn accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if state.config.logging.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                handle_connection(stream, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_connection_error(&e);
            }
        }
    }
}

/// Serve one connection in a spawned local task.
fn handle_connection(stream: TcpStream, state: Arc<AppState>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
