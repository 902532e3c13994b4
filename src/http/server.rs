//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: every path goes to the dispatcher
//! - Wire up middleware (request id, tracing, timeout, body limit)
//! - Run `Dispatcher::serve` off the async reactor
//! - Bind server to listener with graceful shutdown
//! - Observability (metrics, request ids in logs)

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use http_body_util::LengthLimitError;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::context::HttpResponse;
use crate::http::request::to_http_request;
use crate::http::response::{error_response, into_axum_response};
use crate::lifecycle::Shutdown;
use crate::mvc::Dispatcher;
use crate::observability::metrics;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_bytes: usize,
}

/// HTTP front end for a [`Dispatcher`].
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(config: ServerConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let router = build_router(&config, dispatcher);
        Self { router, config }
    }

    /// Run the server until `shutdown` is triggered.
    ///
    /// Subscribes when called; a trigger that happens earlier is missed.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown.notified()).await
    }

    /// Run the server until `signal` completes, then drain in-flight requests.
    pub async fn run_until<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServerConfig, dispatcher: Arc<Dispatcher>) -> Router {
    let state = AppState {
        dispatcher,
        max_body_bytes: config.limits.max_body_bytes,
    };

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

    Router::new()
        .fallback(dispatch_handler)
        .with_state(state)
        .layer(middleware)
}

/// 413 when the body hit the size limit, 400 for any other read failure.
fn body_error_response(error: &axum::Error) -> Response {
    if is_length_limit(error) {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response()
    } else {
        (StatusCode::BAD_REQUEST, "Failed to read request body").into_response()
    }
}

fn is_length_limit(error: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Hands every request to the dispatcher.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();

    let body = match to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Failed to read request body");
            return body_error_response(&e);
        }
    };

    let request = to_http_request(&parts, &body);
    let path = request.path().to_string();
    let request_id = request.request_id().unwrap_or("unknown").to_string();

    let dispatcher = state.dispatcher.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut response = HttpResponse::new();
        let result = dispatcher.serve(&request, &mut response);
        (response, result)
    })
    .await;

    match joined {
        Ok((response, Ok(outcome))) => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                outcome = outcome.as_str(),
                status = response.status().as_u16(),
                "Request dispatched"
            );
            metrics::record_dispatch(outcome.as_str(), start);
            into_axum_response(response)
        }
        Ok((_, Err(e))) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                configuration_defect = e.is_configuration_defect(),
                error = %e,
                "Dispatch failed"
            );
            metrics::record_dispatch(metrics::OUTCOME_ERROR, start);
            error_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Dispatch task panicked");
            metrics::record_dispatch(metrics::OUTCOME_ERROR, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
