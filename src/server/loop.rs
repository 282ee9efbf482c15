// Server loop module
// Accepts connections until shutdown is requested, then drains
// in-flight requests within the grace period

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// How long in-flight requests may keep running after shutdown is
/// requested before the remaining ones are force-closed
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Accept loop
///
/// Runs until the shutdown signal fires. Accept errors are logged and
/// the loop continues; they are transient (e.g. fd exhaustion) and do
/// not invalidate the listener.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: &SignalHandler,
) {
    let active_requests = Arc::new(AtomicUsize::new(0));

    loop {
        if signals.shutdown_requested.load(Ordering::SeqCst) {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_requests);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting before draining
    drop(listener);
    logger::log_shutdown_started();

    drain_requests(&active_requests).await;
}

/// Wait for in-flight requests to finish, bounded by the grace period.
///
/// Idle keep-alive connections hold no request and do not delay the
/// drain; they are torn down when the process exits.
async fn drain_requests(active_requests: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    loop {
        let active = active_requests.load(Ordering::SeqCst);
        if active == 0 {
            logger::log_drain_complete();
            return;
        }

        if tokio::time::Instant::now() >= deadline {
            logger::log_drain_timeout(active);
            return;
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
