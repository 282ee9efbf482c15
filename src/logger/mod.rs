//! Logger module
//!
//! Leveled logging for the sink server. The severity threshold is set
//! once at startup from the resolved configuration. All log lines go
//! to stderr: stdout belongs to the sink when the output target is
//! `-`, and captured messages must stay clean.

mod format;

pub use format::Level;

use format::format_line;
use std::net::SocketAddr;
use std::sync::OnceLock;

use crate::config::Config;

static THRESHOLD: OnceLock<Level> = OnceLock::new();

/// Initialize the logger from the resolved configuration
///
/// Should be called once at application startup. An unrecognized
/// `level` value is an error the caller treats as fatal.
pub fn init(config: &Config) -> Result<(), String> {
    let level: Level = config.level.parse()?;
    let _ = THRESHOLD.set(level);
    Ok(())
}

fn enabled(level: Level) -> bool {
    level >= *THRESHOLD.get_or_init(|| Level::Info)
}

fn write(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    eprintln!("{}", format_line(level, message));
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write(Level::Info, "======================================");
    write(Level::Info, "diag-sink started");
    write(Level::Info, &format!("Listening on: http://{addr}"));
    write(Level::Info, &format!("Log level: {}", config.level));
    write(
        Level::Info,
        &format!("Saving messages to: {}", config.output_target()),
    );
    write(Level::Info, "======================================");
}

pub fn log_server_stopped() {
    write(Level::Info, "Server stopped");
}

pub fn log_signal_received(name: &str) {
    write(Level::Info, &format!("{name} received"));
}

pub fn log_shutdown_started() {
    write(
        Level::Info,
        "Shutdown requested, no longer accepting connections",
    );
}

pub fn log_drain_complete() {
    write(Level::Info, "All in-flight requests completed");
}

pub fn log_drain_timeout(remaining: usize) {
    write(
        Level::Warn,
        &format!("Grace period elapsed, force-closing {remaining} in-flight request(s)"),
    );
}

pub fn log_request(method: &hyper::Method, path: &str) {
    write(Level::Debug, &format!("{method} {path}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write(
        Level::Debug,
        &format!("[Connection] Accepted from: {peer_addr}"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write(
        Level::Error,
        &format!("Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    write(Level::Error, &format!("Failed to bind {addr}: {err}"));
}
