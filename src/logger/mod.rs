//! Logger module
//!
//! Timestamped stdout/stderr logging for the upload server: server lifecycle,
//! per-request access lines, and error/warning output.

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_info(message: &str) {
    println!("[{}] {message}", timestamp());
}

fn write_error(message: &str) {
    eprintln!("[{}] {message}", timestamp());
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Upload server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Upload slot: {}", config.upload.slot_path));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info("======================================\n");
}

pub fn log_request_received(path: &str) {
    write_info(&format!("Request for {path} received."));
}

pub fn log_handler_called(name: &str) {
    write_info(&format!("Request handler '{name}' was called."));
}

pub fn log_no_handler(path: &str) {
    write_info(&format!("No request handler found for {path}"));
}

pub fn log_response(bytes: usize) {
    write_info(&format!("[Response] {bytes} bytes sent"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
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

pub fn log_shutdown() {
    write_info("Shutdown signal received, stopping server");
}
