use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::ResponseBuilder;

/// A request handler. It fills in the response it is given.
pub type Handler = Arc<dyn Fn(&Request, &mut ResponseBuilder) + Send + Sync + 'static>;

/// Exact-match routing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub method: String,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// Maps `(method, path)` pairs to handlers.
///
/// Populated before serving starts, then shared read-only as `Arc<Router>`
/// by every connection.
#[derive(Default, Clone)]
pub struct Router {
    handlers: HashMap<RouteKey, Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, replacing any existing one for the same pair.
    pub fn register<F>(&mut self, method: impl Into<String>, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request, &mut ResponseBuilder) + Send + Sync + 'static,
    {
        self.handlers
            .insert(RouteKey::new(method, path), Arc::new(handler));
    }

    /// Finds the handler for an exact `(method, path)` match.
    pub fn resolve(&self, method: &str, path: &str) -> Option<Handler> {
        self.handlers
            .get(&RouteKey::new(method, path))
            .cloned()
    }

    /// Registered keys, sorted.
    pub fn routes(&self) -> Vec<&RouteKey> {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .finish()
    }
}
