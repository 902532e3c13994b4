//! Handler generations.
//!
//! Four controller contracts coexist. Each one splits responsibility
//! differently between the handler and the dispatcher:
//!
//! | Trait | Writes response | Supplies model |
//! |---|---|---|
//! | [`DirectWriteController`] | handler | handler (inline) |
//! | [`ViewController`] | view | handler, inside the returned `ModelView` |
//! | [`SimpleViewController`] | view | handler, into an adapter-owned `Model` |
//! | [`ModelController`] | view | handler, from parameters only |
//!
//! A [`Handler`] wraps one controller of any generation. The dispatcher never
//! looks inside; adapters recognise their generation with a type test.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::http::context::{HttpRequest, HttpResponse, ParamMap};
use crate::mvc::error::HandlerError;
use crate::mvc::model_view::{Model, ModelView};

/// Generation 1: writes the response itself.
pub trait DirectWriteController: Send + Sync {
    fn process(&self, request: &HttpRequest, response: &mut HttpResponse) -> Result<(), HandlerError>;
}

/// Generation 2: returns a full `ModelView`.
pub trait ViewController: Send + Sync {
    fn process(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<ModelView, HandlerError>;
}

/// Generation 3: fills a model, returns a view name.
pub trait SimpleViewController: Send + Sync {
    fn process(&self, request: &HttpRequest, model: &mut Model) -> Result<String, HandlerError>;
}

/// Generation 4: sees parameters only, fills a model, returns a view name.
pub trait ModelController: Send + Sync {
    fn process(&self, params: &ParamMap, model: &mut Model) -> Result<String, HandlerError>;
}

/// Opaque, shareable unit of application logic.
///
/// Immutable once built; clones share the same controller.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Handler {
    /// Wrap an arbitrary value. Only adapters that know `T` can invoke it.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn direct_write<C: DirectWriteController + 'static>(controller: C) -> Self {
        Self::boxed::<C, Box<dyn DirectWriteController>>(Box::new(controller))
    }

    pub fn view<C: ViewController + 'static>(controller: C) -> Self {
        Self::boxed::<C, Box<dyn ViewController>>(Box::new(controller))
    }

    pub fn simple_view<C: SimpleViewController + 'static>(controller: C) -> Self {
        Self::boxed::<C, Box<dyn SimpleViewController>>(Box::new(controller))
    }

    pub fn model<C: ModelController + 'static>(controller: C) -> Self {
        Self::boxed::<C, Box<dyn ModelController>>(Box::new(controller))
    }

    // Stores the trait object but reports the concrete controller type.
    fn boxed<C: 'static, B: Any + Send + Sync>(boxed: B) -> Self {
        Self {
            inner: Arc::new(boxed),
            type_name: type_name::<C>(),
        }
    }

    /// Type name of the wrapped controller, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Variant test.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn as_direct_write(&self) -> Option<&dyn DirectWriteController> {
        self.downcast_ref::<Box<dyn DirectWriteController>>()
            .map(|c| &**c)
    }

    pub fn as_view(&self) -> Option<&dyn ViewController> {
        self.downcast_ref::<Box<dyn ViewController>>()
            .map(|c| &**c)
    }

    pub fn as_simple_view(&self) -> Option<&dyn SimpleViewController> {
        self.downcast_ref::<Box<dyn SimpleViewController>>()
            .map(|c| &**c)
    }

    pub fn as_model(&self) -> Option<&dyn ModelController> {
        self.downcast_ref::<Box<dyn ModelController>>()
            .map(|c| &**c)
    }

    /// True when both handles share one controller.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
