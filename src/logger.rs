//! Logging helpers for the HTTP server.
//!
//! Plain stdout/stderr logging: one startup line, timestamped access log
//! lines, and error/warning helpers used by the error chain and the
//! connection driver.

use chrono::Local;
use std::net::SocketAddr;

/// Log the startup message. Exactly one line, containing the listening URL.
pub fn log_server_start(addr: &SocketAddr) {
    println!("server start http://{addr}/");
}

/// Access log line in a common-log-ish format.
pub fn log_access(method: &str, path: &str, status: u16, body_bytes: usize) {
    println!(
        "[{}] \"{method} {path}\" {status} {body_bytes}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z")
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
