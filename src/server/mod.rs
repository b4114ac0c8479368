//! Server module
//!
//! Listener setup and the connection accept loop.

pub mod connection;
pub mod listener;

pub use connection::serve;
pub use listener::create_reusable_listener;
