//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: path normalization,
//! method dispatch and the success/error mapping for the sink.

use crate::config::AppState;
use crate::handler::sink;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Path of the single sink endpoint
pub const SINK_PATH: &str = "/sink";

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = normalize_path(req.uri().path());

    logger::log_request(&method, &path);

    let response = match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => http::build_preflight_response(),
        (&Method::POST, SINK_PATH) => match sink::receive(req.into_body(), &state).await {
            Ok(()) => http::build_ok_response(),
            Err(e) => {
                logger::log_error(&format!("Sink write to {} failed: {e}", state.output));
                http::build_500_response(&e.to_string())
            }
        },
        (_, SINK_PATH) => http::build_405_response(),
        _ => http::build_404_response(),
    };

    Ok(response)
}

/// Strip trailing slashes so `/sink/` routes like `/sink`; the bare
/// root path stays `/`
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/sink/"), "/sink");
    }

    #[test]
    fn test_normalize_strips_repeated_trailing_slashes() {
        assert_eq!(normalize_path("/sink///"), "/sink");
    }

    #[test]
    fn test_normalize_keeps_plain_path() {
        assert_eq!(normalize_path("/sink"), "/sink");
        assert_eq!(normalize_path("/other"), "/other");
    }

    #[test]
    fn test_normalize_keeps_root() {
        assert_eq!(normalize_path("/"), "/");
    }
}
