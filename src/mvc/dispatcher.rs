//! Front-controller dispatch.
//!
//! # Lifecycle (per request)
//! ```text
//! Received → Routed → Adapted → Invoked → Rendered | Skipped
//!     │
//!     └─────→ NotFound (no mapping for the path)
//! ```
//!
//! # Design Decisions
//! - Registry, adapters and resolver are fixed at build time
//! - The first adapter whose `supports` returns true wins
//! - No retries: handler side effects are not assumed idempotent
//! - Failures the dispatcher did not raise are returned as-is

use std::sync::Arc;

use axum::http::StatusCode;

use crate::http::context::{HttpRequest, HttpResponse};
use crate::mvc::adapter::{default_adapters, HandlerAdapter};
use crate::mvc::error::{DispatchError, VerifyError};
use crate::mvc::handler::Handler;
use crate::mvc::model_view::HandlerOutcome;
use crate::mvc::registry::HandlerRegistry;
use crate::mvc::view::{TemplateEngine, ViewResolver};

/// Intermediate states, traced at `trace` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Received,
    Routed,
    Adapted,
    Invoked,
}

/// Terminal state of a successful `serve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No handler is mapped to the path; status set to 404.
    NotFound,
    /// A view was resolved and rendered.
    Rendered,
    /// The handler wrote the response itself.
    Skipped,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::NotFound => "not_found",
            DispatchOutcome::Rendered => "rendered",
            DispatchOutcome::Skipped => "skipped",
        }
    }
}

/// Builds an immutable [`Dispatcher`].
pub struct DispatcherBuilder {
    registry: HandlerRegistry,
    adapters: Vec<Box<dyn HandlerAdapter>>,
    resolver: ViewResolver,
    engine: Arc<dyn TemplateEngine>,
}

impl DispatcherBuilder {
    /// Map `path` to `handler`. A later mapping for the same path wins.
    pub fn handler(mut self, path: impl Into<String>, handler: Handler) -> Self {
        self.registry.register(path, handler);
        self
    }

    pub fn handlers<I, P>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = (P, Handler)>,
        P: Into<String>,
    {
        for (path, handler) in routes {
            self.registry.register(path, handler);
        }
        self
    }

    /// Append an adapter. Order is precedence.
    pub fn adapter<A: HandlerAdapter + 'static>(mut self, adapter: A) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    pub fn adapters(mut self, adapters: impl IntoIterator<Item = Box<dyn HandlerAdapter>>) -> Self {
        self.adapters.extend(adapters);
        self
    }

    /// Append the four built-in adapters.
    pub fn default_adapters(self) -> Self {
        self.adapters(default_adapters())
    }

    pub fn view_resolver(mut self, resolver: ViewResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn build(self) -> Dispatcher {
        tracing::debug!(
            handlers = self.registry.len(),
            adapters = self.adapters.len(),
            "Dispatcher built"
        );
        Dispatcher {
            registry: self.registry,
            adapters: self.adapters,
            resolver: self.resolver,
            engine: self.engine,
        }
    }
}

/// Single entry point for every request.
pub struct Dispatcher {
    registry: HandlerRegistry,
    adapters: Vec<Box<dyn HandlerAdapter>>,
    resolver: ViewResolver,
    engine: Arc<dyn TemplateEngine>,
}

impl Dispatcher {
    /// Start building a dispatcher that renders through `engine`.
    ///
    /// The builder starts with no handlers, no adapters and the default resolver.
    pub fn builder(engine: Arc<dyn TemplateEngine>) -> DispatcherBuilder {
        DispatcherBuilder {
            registry: HandlerRegistry::new(),
            adapters: Vec::new(),
            resolver: ViewResolver::default(),
            engine,
        }
    }

    /// Route, invoke and render one request.
    pub fn serve(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<DispatchOutcome, DispatchError> {
        let path = request.path();
        tracing::trace!(path = %path, state = ?DispatchState::Received);

        let Some(handler) = self.registry.lookup(path) else {
            tracing::debug!(path = %path, "No handler mapped");
            response.set_status(StatusCode::NOT_FOUND);
            return Ok(DispatchOutcome::NotFound);
        };
        tracing::trace!(path = %path, handler = handler.type_name(), state = ?DispatchState::Routed);

        let Some(adapter) = self.adapter_for(handler) else {
            return Err(DispatchError::AdapterNotFound {
                path: path.to_string(),
                handler: handler.type_name(),
            });
        };
        tracing::trace!(path = %path, adapter = adapter.name(), state = ?DispatchState::Adapted);

        let outcome = adapter.handle(request, response, handler)?;
        tracing::trace!(path = %path, state = ?DispatchState::Invoked);

        match outcome {
            HandlerOutcome::AlreadyHandled => Ok(DispatchOutcome::Skipped),
            HandlerOutcome::Render(mv) => {
                if mv.view_name().is_empty() {
                    return Err(DispatchError::EmptyViewName {
                        path: path.to_string(),
                    });
                }
                let (view_name, model) = mv.into_parts();
                let view = self.resolver.resolve(&view_name);
                tracing::trace!(path = %path, template = view.template(), "Rendering view");
                view.render(&model, request, response, self.engine.as_ref())?;
                Ok(DispatchOutcome::Rendered)
            }
        }
    }

    /// First adapter, in registration order, that supports `handler`.
    pub fn adapter_for(&self, handler: &Handler) -> Option<&dyn HandlerAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.supports(handler))
            .map(|adapter| &**adapter)
    }

    /// Check that every registered handler has a supporting adapter.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let mut uncovered: Vec<(String, &'static str)> = self
            .registry
            .iter()
            .filter(|(_, handler)| self.adapter_for(handler).is_none())
            .map(|(path, handler)| (path.to_string(), handler.type_name()))
            .collect();

        if uncovered.is_empty() {
            return Ok(());
        }
        uncovered.sort();
        Err(VerifyError { uncovered })
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &ViewResolver {
        &self.resolver
    }

    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.name()).collect()
    }
}
