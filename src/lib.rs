//! Minimal HTTP upload server library.
//!
//! An immutable route table maps exact URL paths to handlers; a dispatcher
//! resolves incoming paths and fires the matched handler; each handler owns
//! its response sink and finalizes it exactly once, possibly from the
//! completion point of one asynchronous sub-operation (file read, subprocess
//! exit, form parse).

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod storage;
