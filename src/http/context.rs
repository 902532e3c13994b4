//! Request/response carriers handed to the dispatch core.
//!
//! # Responsibilities
//! - Carry inbound path, method and parameters (read-only for handlers)
//! - Collect outbound status, headers and body written by handlers and views
//!
//! # Design Decisions
//! - Transport independent: axum types stay in `server.rs`
//! - Parameters keep the first value of a repeated key

use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

/// Request parameters keyed by name.
pub type ParamMap = HashMap<String, String>;

/// Inbound request data as seen by handlers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    path: String,
    params: ParamMap,
    request_id: Option<String>,
}

impl HttpRequest {
    /// Create a request for `path` with no parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: ParamMap::new(),
            request_id: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a parameter. An already present key keeps its first value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_param(name, value);
        self
    }

    /// Add every pair in order, keeping first values.
    pub fn with_params<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            self.add_param(name, value);
        }
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_insert_with(|| value.into());
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a single parameter value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// Outbound response sink.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// An empty `200 OK` response.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Set (replace) a header.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn set_content_type(&mut self, value: &'static str) {
        self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(value));
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Append text to the body.
    pub fn write(&mut self, text: &str) {
        self.body.extend_from_slice(text.as_bytes());
    }

    /// Append raw bytes to the body.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, lossy.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, Vec<u8>) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param_value_wins() {
        let req = HttpRequest::post("/save")
            .with_params([("username", "kim"), ("age", "20"), ("username", "lee")]);

        assert_eq!(req.param("username"), Some("kim"));
        assert_eq!(req.param("age"), Some("20"));
        assert_eq!(req.param("missing"), None);
        assert_eq!(req.params().len(), 2);
        assert_eq!(*req.method(), Method::POST);
    }

    #[test]
    fn test_response_accumulates_body() {
        let mut resp = HttpResponse::new();
        resp.write("<p>");
        resp.write_bytes(b"hi");
        resp.write("</p>");
        resp.set_content_type("text/html; charset=utf-8");
        resp.set_status(StatusCode::CREATED);

        assert_eq!(resp.body_text(), "<p>hi</p>");
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn test_default_response_is_ok_and_empty() {
        let (status, headers, body) = HttpResponse::default().into_parts();
        assert_eq!(status, StatusCode::OK);
        assert!(headers.is_empty());
        assert!(body.is_empty());
    }
}
