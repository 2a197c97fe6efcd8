//! Platform request/response model.
//!
//! These are the shapes the serverless runtime hands to a handler and
//! receives back from it. They are transient, request-scoped values: a
//! `FunctionRequest` is owned by the invocation that receives it, and a
//! `FunctionResponse` is built exactly once and is terminal — nothing
//! mutates the exchange after it is handed back to the platform.

use std::collections::HashMap;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::Value;

/// One inbound HTTP request as delivered by the platform.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    /// HTTP method of the request.
    pub method: Method,
    /// Decoded query-string mapping.
    pub query: HashMap<String, String>,
    /// Request body, if any. A textual body arrives as `Value::String`;
    /// platforms that pre-parse JSON deliver the structured value.
    pub body: Option<Value>,
}

impl FunctionRequest {
    /// Create a bodyless GET request with the given query parameters.
    pub fn get(query: HashMap<String, String>) -> Self {
        Self {
            method: Method::GET,
            query,
            body: None,
        }
    }

    /// Create a POST request with the given body.
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            query: HashMap::new(),
            body: Some(body),
        }
    }
}

/// Per-invocation platform context.
///
/// Passed to handlers and to derived options factories. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Identifier of this invocation, minted by the platform shim.
    pub invocation_id: String,
}

impl RequestContext {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            invocation_id: invocation_id.into(),
        }
    }
}

/// One outbound HTTP response handed back to the platform.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body text.
    pub body: String,
}

impl FunctionResponse {
    /// A `200 OK` response with `Content-Type: application/json`.
    pub fn json(body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status: StatusCode::OK,
            headers,
            body: body.into(),
        }
    }

    /// A `200 OK` response with `Content-Type: text/html`.
    pub fn html(body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        Self {
            status: StatusCode::OK,
            headers,
            body: body.into(),
        }
    }

    /// A response with the given status and body and no headers.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_sets_content_type() {
        let resp = FunctionResponse::json("{}");
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(resp.body, "{}");
    }

    #[test]
    fn html_response_sets_content_type() {
        let resp = FunctionResponse::html("<html></html>");
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "text/html");
    }

    #[test]
    fn text_response_has_no_headers() {
        let resp = FunctionResponse::text(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(resp.headers.is_empty());
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
