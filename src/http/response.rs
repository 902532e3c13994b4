//! Response conversion.
//!
//! # Responsibilities
//! - Turn the dispatcher's [`HttpResponse`] into an axum response
//! - Map dispatch failures to status codes at the transport boundary
//!
//! # Design Decisions
//! - Every dispatch failure is a 500; the server logs it once with request context
//! - Error bodies are short plain text, never internal details

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::context::HttpResponse;

pub fn into_axum_response(response: HttpResponse) -> Response {
    let (status, headers, body) = response.into_parts();
    let mut out = Response::new(Body::from(body));
    *out.status_mut() = status;
    *out.headers_mut() = headers;
    out
}

/// Transport-level answer to a failed dispatch.
pub fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_headers_and_body_are_kept() {
        let mut resp = HttpResponse::new();
        resp.set_status(StatusCode::NOT_FOUND);
        resp.set_content_type("text/plain");
        resp.write("gone");

        let out = into_axum_response(resp);
        assert_eq!(out.status(), StatusCode::NOT_FOUND);
        assert_eq!(out.headers().get("content-type").unwrap(), "text/plain");
    }

    #[tokio::test]
    async fn test_error_body_is_generic() {
        let out = error_response();
        assert_eq!(out.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(out.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
