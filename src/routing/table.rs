//! Route table module
//!
//! An immutable mapping from exact URL path to handler, built once at
//! startup before the listener accepts traffic.

use crate::handler::Handler;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Error raised while building a route table.
///
/// Duplicate bindings are a configuration mistake and fail fast at startup,
/// never at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    DuplicateRoute(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute(path) => {
                write!(f, "duplicate route binding for path '{path}'")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Immutable path-to-handler mapping.
///
/// Paths are distinct literal strings; there is no pattern syntax, prefix
/// matching, or trailing-slash normalization. Once built the table is
/// read-only.
pub struct RouteTable {
    routes: HashMap<String, Arc<dyn Handler>>,
}

impl RouteTable {
    /// Build a table from `(path, handler)` bindings.
    pub fn build(bindings: Vec<(&str, Arc<dyn Handler>)>) -> Result<Self, TableError> {
        let mut routes = HashMap::with_capacity(bindings.len());
        for (path, handler) in bindings {
            if routes.insert(path.to_string(), handler).is_some() {
                return Err(TableError::DuplicateRoute(path.to_string()));
            }
        }
        Ok(Self { routes })
    }

    /// Exact-match lookup.
    pub fn lookup(&self, path: &str) -> Option<&Arc<dyn Handler>> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
