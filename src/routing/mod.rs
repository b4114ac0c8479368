//! Routing module
//!
//! The immutable route table and the dispatcher that resolves paths
//! against it.

pub mod dispatcher;
pub mod table;

pub use dispatcher::dispatch;
pub use table::{RouteTable, TableError};
