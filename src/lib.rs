//! Front-controller request dispatch engine.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mvc;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mvc::{DispatchError, DispatchOutcome, Dispatcher, Handler};
