// Application state module
// Immutable per-process serving state, built once before the listener starts

use super::types::Config;
use crate::routing::RouteTable;

/// Application state shared by every connection.
///
/// The route table is constructed once in `main` and never mutated while the
/// server is accepting traffic; connections receive it behind an `Arc`.
pub struct AppState {
    pub config: Config,
    pub table: RouteTable,
}

impl AppState {
    pub fn new(config: Config, table: RouteTable) -> Self {
        Self { config, table }
    }
}
