//! Path → handler mapping table.
//!
//! # Design Decisions
//! - Exact, case-sensitive string match; no normalization, no wildcards
//! - Built once at startup, read-only afterwards (no locks)
//! - A miss is a normal query outcome, not an error

use std::collections::HashMap;

use crate::mvc::handler::Handler;

#[derive(Debug, Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `path` to `handler`, returning the handler it replaced, if any.
    pub fn register(&mut self, path: impl Into<String>, handler: Handler) -> Option<Handler> {
        let path = path.into();
        let previous = self.handlers.insert(path.clone(), handler);
        if let Some(old) = &previous {
            tracing::warn!(path = %path, replaced = old.type_name(), "Handler mapping overwritten");
        }
        previous
    }

    pub fn lookup(&self, path: &str) -> Option<&Handler> {
        self.handlers.get(path)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.handlers.iter().map(|(path, handler)| (path.as_str(), handler))
    }
}

impl<P: Into<String>> FromIterator<(P, Handler)> for HandlerRegistry {
    fn from_iter<I: IntoIterator<Item = (P, Handler)>>(iter: I) -> Self {
        let mut registry = HandlerRegistry::new();
        for (path, handler) in iter {
            registry.register(path, handler);
        }
        registry
    }
}
