//! Request extraction.
//!
//! # Responsibilities
//! - Read the request id set by `SetRequestIdLayer`
//! - Build the parameter map from query string and form body
//! - Turn an axum request head into an [`HttpRequest`]
//!
//! # Design Decisions
//! - Query parameters come before body parameters; first value wins
//! - Only `application/x-www-form-urlencoded` bodies are decoded

use axum::http::{header, request::Parts, HeaderMap};
use url::form_urlencoded;

use crate::http::context::HttpRequest;

pub const X_REQUEST_ID: &str = "x-request-id";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request id assigned by the middleware stack, if any.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// True when the body carries urlencoded form fields.
pub fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Build the dispatcher's view of a request.
pub fn to_http_request(parts: &Parts, body: &[u8]) -> HttpRequest {
    let mut request = HttpRequest::new(parts.method.clone(), parts.uri.path());

    if let Some(query) = parts.uri.query() {
        request = request.with_params(form_urlencoded::parse(query.as_bytes()));
    }
    if !body.is_empty() && is_form(&parts.headers) {
        request = request.with_params(form_urlencoded::parse(body));
    }
    if let Some(id) = request_id(&parts.headers) {
        request = request.with_request_id(id);
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request};

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_query_params_are_decoded() {
        let parts = parts(Request::builder().uri("/members/save?username=kim%20a&age=20"));
        let req = to_http_request(&parts, b"");

        assert_eq!(req.path(), "/members/save");
        assert_eq!(req.param("username"), Some("kim a"));
        assert_eq!(req.param("age"), Some("20"));
    }

    #[test]
    fn test_form_body_is_decoded_after_query() {
        let parts = parts(
            Request::builder()
                .method(Method::POST)
                .uri("/save?age=1")
                .header("content-type", "application/x-www-form-urlencoded; charset=utf-8")
                .header(X_REQUEST_ID, "req-1"),
        );
        let req = to_http_request(&parts, b"username=lee&age=30");

        assert_eq!(req.param("username"), Some("lee"));
        assert_eq!(req.param("age"), Some("1"));
        assert_eq!(req.request_id(), Some("req-1"));
        assert_eq!(*req.method(), Method::POST);
    }

    #[test]
    fn test_non_form_body_is_ignored() {
        let parts = parts(
            Request::builder()
                .method(Method::POST)
                .uri("/save")
                .header("content-type", "application/json"),
        );
        let req = to_http_request(&parts, br#"{"username":"x"}"#);
        assert!(req.params().is_empty());
    }

    #[test]
    fn test_path_is_not_normalized() {
        let parts = parts(Request::builder().uri("/members/"));
        assert_eq!(to_http_request(&parts, b"").path(), "/members/");
    }
}
