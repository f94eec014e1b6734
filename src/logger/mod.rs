//! Logger module
//!
//! Provides logging utilities for the fixture:
//! - Startup and shutdown lines
//! - Access logging in Common Log Format
//! - Error and warning logging

mod format;

pub use format::{version_digits, AccessLogEntry};

use std::net::SocketAddr;

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr) {
    write_info(&format!("Serving at port {}", addr.port()));
    write_info(&format!("Listening on: http://{addr}"));
}

pub fn log_shutdown(signal: &str, active_connections: usize) {
    write_info(&format!(
        "[SIGNAL] {signal} received, closing listener ({active_connections} connections still active)"
    ));
}

pub fn log_port_fallback(raw: &str, default_port: u16) {
    log_warning(&format!(
        "Ignoring invalid PORT value {raw:?}, using default port {default_port}"
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log a handled request
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format_common());
}
