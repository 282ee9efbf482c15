// Application state module
// Fixed per-process state handed to every request

use tokio::sync::Mutex;

use super::types::{Config, OutputTarget};

/// Application state
///
/// Holds everything a request handler can see: the output target
/// resolved once at startup, and the lock serializing sink writes
/// so concurrent requests cannot interleave inside one message.
pub struct AppState {
    pub output: OutputTarget,
    pub write_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            output: config.output_target(),
            write_lock: Mutex::new(()),
        }
    }
}
