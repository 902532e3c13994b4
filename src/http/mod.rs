//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request id, query + form parameters)
//!     → context.rs (HttpRequest / HttpResponse handed to the dispatcher)
//!     → [mvc::Dispatcher::serve]
//!     → response.rs (HttpResponse or DispatchError → axum Response)
//!     → Send to client
//! ```

pub mod context;
pub mod request;
pub mod response;
pub mod server;

pub use context::{HttpRequest, HttpResponse, ParamMap};
pub use request::X_REQUEST_ID;
pub use server::{build_router, HttpServer};
