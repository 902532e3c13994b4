//! Dispatch error taxonomy.
//!
//! # Design Decisions
//! - A routing miss is not an error (see `DispatchOutcome::NotFound`)
//! - Handler and render failures are carried transparently, never re-kinded
//! - Adapter misses are configuration defects and surface as their own variant

use thiserror::Error;

/// Error raised by application handlers.
///
/// Handlers own their error types; the dispatcher only carries them.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while materializing a view.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template directory not found: {0}")]
    TemplateDirMissing(String),

    #[error("no templates found in {0}")]
    NoTemplates(String),

    #[error("template engine error: {0}")]
    Engine(#[from] tera::Error),
}

/// Errors surfaced by [`Dispatcher::serve`](super::Dispatcher::serve).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No adapter in the active list supports the handler mapped to `path`.
    #[error("no handler adapter supports handler {handler} mapped to {path}")]
    AdapterNotFound { path: String, handler: &'static str },

    /// The handler itself failed.
    #[error(transparent)]
    Handler(HandlerError),

    /// A handler returned an empty view name.
    #[error("handler mapped to {path} returned an empty view name")]
    EmptyViewName { path: String },

    /// An adapter was asked to invoke a handler it does not support.
    #[error("adapter {adapter} cannot invoke handler {handler}")]
    HandlerMismatch {
        adapter: &'static str,
        handler: &'static str,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl DispatchError {
    /// True for errors caused by wiring rather than by a request.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            DispatchError::AdapterNotFound { .. } | DispatchError::HandlerMismatch { .. }
        )
    }
}

/// Raised by [`Dispatcher::verify`](super::Dispatcher::verify) when registered
/// handlers have no supporting adapter.
#[derive(Debug, Error)]
#[error("{} handler(s) without a supporting adapter: {}", .uncovered.len(), describe(.uncovered))]
pub struct VerifyError {
    /// `(path, handler type)` pairs without an adapter, sorted by path.
    pub uncovered: Vec<(String, &'static str)>,
}

fn describe(uncovered: &[(String, &'static str)]) -> String {
    uncovered
        .iter()
        .map(|(path, handler)| format!("{} -> {}", path, handler))
        .collect::<Vec<_>>()
        .join(", ")
}
