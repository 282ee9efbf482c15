// Connection handling module
// Serves one HTTP/1.1 connection per spawned task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection and serve it on its own task.
///
/// `active_requests` counts requests currently inside the handler;
/// the shutdown path waits on it during the grace period.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
    active_requests: &Arc<AtomicUsize>,
) {
    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, Arc::clone(state), Arc::clone(active_requests));
}

/// Serve a single connection in a spawned task.
///
/// Requests on the same connection are counted individually, so a
/// keep-alive connection sitting idle does not hold up shutdown.
fn handle_connection(
    stream: tokio::net::TcpStream,
    state: Arc<AppState>,
    active_requests: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                let active_requests = Arc::clone(&active_requests);
                async move {
                    active_requests.fetch_add(1, Ordering::SeqCst);
                    let response = handler::handle_request(req, state).await;
                    active_requests.fetch_sub(1, Ordering::SeqCst);
                    response
                }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
