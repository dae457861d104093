//! Logger module
//!
//! Logging utilities for the file server:
//! - Startup banner
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AppState, Config};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    write_info(&serving_banner(addr));
    write_info(&format!("Root directory: {}", state.root.display()));
    if let Some(workers) = state.config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = state.config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = state.config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
}

/// `Serving HTTP on 0.0.0.0 port 8000 (http://0.0.0.0:8000/) ...`
fn serving_banner(addr: &SocketAddr) -> String {
    let host = addr.ip();
    let url_host = if host.is_ipv6() {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    format!(
        "Serving HTTP on {host} port {port} (http://{url_host}:{port}/) ...",
        port = addr.port()
    )
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
