//! Collaborator traits.
//!
//! The adapter delegates all GraphQL semantics to an execution engine and
//! all HTML generation to a page renderer. Both are injected behind
//! boxed-future traits so handlers stay engine-agnostic and tests can
//! substitute mocks.

use std::collections::HashMap;

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExecuteError;
use crate::options::BoxFuture;
use crate::payload::QueryPayload;
use crate::request::{FunctionRequest, RequestContext};

/// The GraphQL execution engine boundary.
///
/// Parses, validates and resolves one operation. Implementations signal an
/// expected query problem with [`ExecuteError::Query`] and anything else
/// with [`ExecuteError::Internal`].
pub trait QueryExecutor: Send + Sync {
    /// Engine-specific execution options (schema handle, context factory,
    /// whatever the engine needs). Resolved per invocation by the bridge.
    type Options: Clone + Send + Sync;

    /// Execute one operation and return its JSON-serializable result.
    fn execute<'a>(
        &'a self,
        method: &'a Method,
        payload: &'a QueryPayload,
        options: &'a Self::Options,
        ctx: &'a RequestContext,
    ) -> BoxFuture<'a, Result<Value, ExecuteError>>;
}

/// Page data for the interactive query-exploration UI.
///
/// Everything except the endpoint URL is an optional pre-fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerData {
    /// URL the explorer page sends its queries to.
    pub endpoint: String,
    /// Query text to pre-fill.
    pub query: Option<String>,
    /// Variables to pre-fill.
    pub variables: Option<Value>,
    /// Operation name to pre-fill.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    /// Result to pre-fill.
    pub result: Option<Value>,
}

impl ExplorerData {
    /// Page data pointing at the given endpoint, with no pre-fills.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: None,
            variables: None,
            operation_name: None,
            result: None,
        }
    }
}

/// The explorer-page generation boundary.
pub trait ExplorerRenderer: Send + Sync {
    /// Render the explorer HTML for one request.
    ///
    /// `params` is the request's query-string mapping, forwarded so the
    /// renderer can pre-fill the page from request parameters.
    fn render<'a>(
        &'a self,
        params: &'a HashMap<String, String>,
        data: &'a ExplorerData,
        ctx: &'a RequestContext,
        request: &'a FunctionRequest,
    ) -> BoxFuture<'a, anyhow::Result<String>>;
}
