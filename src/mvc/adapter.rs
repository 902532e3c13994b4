//! Handler adapters.
//!
//! # Responsibilities
//! - Recognise one handler generation (`supports`, a pure type test)
//! - Invoke it and normalize its result into a [`HandlerOutcome`]
//!
//! # Design Decisions
//! - Handler errors pass through untouched
//! - Only [`DirectWriteAdapter`] lets the handler write the response; it
//!   reports [`HandlerOutcome::AlreadyHandled`] so rendering is skipped
//! - A new generation needs a new adapter, never a dispatcher change

use crate::http::context::{HttpRequest, HttpResponse};
use crate::mvc::error::DispatchError;
use crate::mvc::handler::Handler;
use crate::mvc::model_view::{HandlerOutcome, Model, ModelView};

/// Bridge between the dispatcher and one handler generation.
pub trait HandlerAdapter: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns true if this adapter can invoke `handler`.
    fn supports(&self, handler: &Handler) -> bool;

    /// Invoke `handler` for this request.
    fn handle(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError>;
}

/// The built-in adapters, one per generation, in generation order.
pub fn default_adapters() -> Vec<Box<dyn HandlerAdapter>> {
    vec![
        Box::new(DirectWriteAdapter),
        Box::new(ViewAdapter),
        Box::new(SimpleViewAdapter),
        Box::new(ModelAdapter),
    ]
}

fn mismatch(adapter: &'static str, handler: &Handler) -> DispatchError {
    DispatchError::HandlerMismatch {
        adapter,
        handler: handler.type_name(),
    }
}

/// Adapter for [`DirectWriteController`](crate::mvc::DirectWriteController).
///
/// Side effect: the handler writes the response body itself. Always returns
/// [`HandlerOutcome::AlreadyHandled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectWriteAdapter;

impl HandlerAdapter for DirectWriteAdapter {
    fn name(&self) -> &'static str {
        "direct-write"
    }

    fn supports(&self, handler: &Handler) -> bool {
        handler.as_direct_write().is_some()
    }

    fn handle(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError> {
        let controller = handler
            .as_direct_write()
            .ok_or_else(|| mismatch(self.name(), handler))?;
        controller
            .process(request, response)
            .map_err(DispatchError::Handler)?;
        Ok(HandlerOutcome::AlreadyHandled)
    }
}

/// Adapter for [`ViewController`](crate::mvc::ViewController).
///
/// The controller receives the response but its `ModelView` is rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewAdapter;

impl HandlerAdapter for ViewAdapter {
    fn name(&self) -> &'static str {
        "view"
    }

    fn supports(&self, handler: &Handler) -> bool {
        handler.as_view().is_some()
    }

    fn handle(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError> {
        let controller = handler
            .as_view()
            .ok_or_else(|| mismatch(self.name(), handler))?;
        let mv = controller
            .process(request, response)
            .map_err(DispatchError::Handler)?;
        Ok(HandlerOutcome::Render(mv))
    }
}

/// Adapter for [`SimpleViewController`](crate::mvc::SimpleViewController).
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleViewAdapter;

impl HandlerAdapter for SimpleViewAdapter {
    fn name(&self) -> &'static str {
        "simple-view"
    }

    fn supports(&self, handler: &Handler) -> bool {
        handler.as_simple_view().is_some()
    }

    fn handle(
        &self,
        request: &HttpRequest,
        _response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError> {
        let controller = handler
            .as_simple_view()
            .ok_or_else(|| mismatch(self.name(), handler))?;

        let mut model = Model::new();
        let view_name = controller
            .process(request, &mut model)
            .map_err(DispatchError::Handler)?;
        Ok(HandlerOutcome::Render(ModelView::with_model(view_name, model)))
    }
}

/// Adapter for [`ModelController`](crate::mvc::ModelController).
///
/// Builds the parameter map from the request; the controller never sees the
/// request or response.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelAdapter;

impl HandlerAdapter for ModelAdapter {
    fn name(&self) -> &'static str {
        "model"
    }

    fn supports(&self, handler: &Handler) -> bool {
        handler.as_model().is_some()
    }

    fn handle(
        &self,
        request: &HttpRequest,
        _response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError> {
        let controller = handler
            .as_model()
            .ok_or_else(|| mismatch(self.name(), handler))?;

        let params = request.params().clone();
        let mut model = Model::new();
        let view_name = controller
            .process(&params, &mut model)
            .map_err(DispatchError::Handler)?;
        Ok(HandlerOutcome::Render(ModelView::with_model(view_name, model)))
    }
}
