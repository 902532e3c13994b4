//! Shared utilities for dispatch integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use front_controller::http::{HttpRequest, HttpResponse};
use front_controller::mvc::{
    DispatchError, Handler, HandlerAdapter, HandlerOutcome, Model, RenderError, TemplateEngine,
};

/// Template engine that records every render call.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<(String, Model)>>,
}

#[allow(dead_code)]
impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, Model)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TemplateEngine for RecordingEngine {
    fn render(&self, template: &str, model: &Model) -> Result<String, RenderError> {
        self.calls
            .lock()
            .unwrap()
            .push((template.to_string(), model.clone()));
        Ok(format!("rendered:{}", template))
    }
}

/// Wraps an adapter and counts `supports` and `handle` calls.
#[allow(dead_code)]
pub struct CountingAdapter<A> {
    inner: A,
    name: &'static str,
    pub supports_calls: Arc<AtomicUsize>,
    pub handle_calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl<A: HandlerAdapter> CountingAdapter<A> {
    pub fn new(name: &'static str, inner: A) -> Self {
        Self {
            inner,
            name,
            supports_calls: Arc::new(AtomicUsize::new(0)),
            handle_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.supports_calls.clone(), self.handle_calls.clone())
    }
}

impl<A: HandlerAdapter> HandlerAdapter for CountingAdapter<A> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, handler: &Handler) -> bool {
        self.supports_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.supports(handler)
    }

    fn handle(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
        handler: &Handler,
    ) -> Result<HandlerOutcome, DispatchError> {
        self.handle_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.handle(request, response, handler)
    }
}

#[allow(dead_code)]
pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
