//! Request dispatch core.
//!
//! # Data Flow
//! ```text
//! HttpRequest
//!     → dispatcher.rs (single entry point)
//!     → registry.rs (exact path lookup)        → miss: 404, done
//!     → adapter.rs (first adapter that supports the handler)
//!     → handler.rs (one of four controller generations)
//!     → model_view.rs (Render(ModelView) | AlreadyHandled)
//!     → view.rs (resolve name → View, render through TemplateEngine)
//!     → HttpResponse
//! ```
//!
//! # Design Decisions
//! - Synchronous and transport independent; the HTTP layer owns threading
//! - Adding a handler generation means adding a trait and an adapter only

pub mod adapter;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod model_view;
pub mod registry;
pub mod view;

pub use adapter::{
    default_adapters, DirectWriteAdapter, HandlerAdapter, ModelAdapter, SimpleViewAdapter,
    ViewAdapter,
};
pub use dispatcher::{DispatchOutcome, DispatchState, Dispatcher, DispatcherBuilder};
pub use error::{DispatchError, HandlerError, RenderError, VerifyError};
pub use handler::{
    DirectWriteController, Handler, ModelController, SimpleViewController, ViewController,
};
pub use model_view::{HandlerOutcome, Model, ModelView};
pub use registry::HandlerRegistry;
pub use view::{TemplateEngine, TeraEngine, View, ViewResolver};
