//! The query bridge.
//!
//! `QueryBridge` converts one HTTP request into one GraphQL execution call
//! and the outcome back into one HTTP response. Recognized query failures
//! are absorbed into the response; anything else escapes to the caller so
//! the platform's generic failure handling applies.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use funcql_core::{
    ConfigError, ExecuteError, FunctionRequest, FunctionResponse, OptionsSource, QueryExecutor,
    RequestContext,
};

use crate::extract;

/// Bridges inbound requests to a GraphQL execution engine.
pub struct QueryBridge<E: QueryExecutor> {
    executor: Arc<E>,
    options: OptionsSource<E::Options>,
}

impl<E: QueryExecutor> std::fmt::Debug for QueryBridge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBridge")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Builder for [`QueryBridge`].
///
/// Exactly one options source must be supplied before [`build`] — either a
/// static value or a derived factory. Construction fails otherwise; no
/// handler is produced.
///
/// [`build`]: QueryBridgeBuilder::build
pub struct QueryBridgeBuilder<E: QueryExecutor> {
    executor: Arc<E>,
    sources: Vec<OptionsSource<E::Options>>,
}

impl<E: QueryExecutor> QueryBridge<E> {
    /// Start building a bridge around the given execution engine.
    pub fn builder(executor: E) -> QueryBridgeBuilder<E> {
        QueryBridgeBuilder {
            executor: Arc::new(executor),
            sources: Vec::new(),
        }
    }

    /// Handle one invocation.
    ///
    /// Returns the response to complete the invocation with, or the
    /// unrecognized failure to propagate. The sequence per invocation is
    /// fixed: resolve options, extract the payload, delegate, translate.
    pub async fn handle(
        &self,
        ctx: &RequestContext,
        request: &FunctionRequest,
    ) -> Result<FunctionResponse> {
        let options = self.options.resolve(ctx).await;
        let payload = extract::graphql_payload(request);

        debug!(
            invocation = %ctx.invocation_id,
            method = %request.method,
            "dispatching GraphQL operation"
        );

        match self
            .executor
            .execute(&request.method, &payload, &options, ctx)
            .await
        {
            Ok(data) => {
                let body = serde_json::to_string(&data)
                    .context("failed to serialize execution result")?;
                Ok(FunctionResponse::json(body))
            }
            Err(ExecuteError::Query(err)) => {
                debug!(
                    invocation = %ctx.invocation_id,
                    status = %err.status,
                    "query failed"
                );
                Ok(FunctionResponse {
                    status: err.status,
                    headers: err.headers,
                    body: err.message,
                })
            }
            Err(ExecuteError::Internal(err)) => Err(err),
        }
    }
}

impl<E: QueryExecutor> QueryBridgeBuilder<E> {
    /// Supply a static options value.
    pub fn options(mut self, options: E::Options) -> Self {
        self.sources.push(OptionsSource::Static(options));
        self
    }

    /// Supply an options source directly (static or derived).
    pub fn options_with(mut self, source: OptionsSource<E::Options>) -> Self {
        self.sources.push(source);
        self
    }

    /// Finish construction.
    pub fn build(mut self) -> Result<QueryBridge<E>, ConfigError> {
        match self.sources.len() {
            0 => Err(ConfigError::MissingOptions),
            1 => Ok(QueryBridge {
                executor: self.executor,
                options: self.sources.remove(0),
            }),
            n => Err(ConfigError::ConflictingOptions(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use http::header::CONTENT_TYPE;
    use http::{Method, StatusCode};
    use serde_json::{Value, json};

    use funcql_core::{BoxFuture, HttpQueryError, QueryPayload};

    /// Scripted outcome for the mock engine.
    #[derive(Clone)]
    enum Outcome {
        Data(Value),
        Failure {
            status: StatusCode,
            headers: Vec<(&'static str, &'static str)>,
            message: &'static str,
        },
        Internal(&'static str),
    }

    /// Mock execution engine — records every call it receives.
    struct MockExecutor {
        outcome: Outcome,
        calls: Arc<Mutex<Vec<(Method, QueryPayload, String)>>>,
    }

    impl MockExecutor {
        fn new(outcome: Outcome) -> (Self, Arc<Mutex<Vec<(Method, QueryPayload, String)>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    outcome,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl QueryExecutor for MockExecutor {
        type Options = String;

        fn execute<'a>(
            &'a self,
            method: &'a Method,
            payload: &'a QueryPayload,
            options: &'a String,
            _ctx: &'a RequestContext,
        ) -> BoxFuture<'a, Result<Value, ExecuteError>> {
            self.calls
                .lock()
                .unwrap()
                .push((method.clone(), payload.clone(), options.clone()));
            let outcome = self.outcome.clone();
            Box::pin(async move {
                match outcome {
                    Outcome::Data(value) => Ok(value),
                    Outcome::Failure {
                        status,
                        headers,
                        message,
                    } => {
                        let mut err = HttpQueryError::new(status, message);
                        for (name, value) in headers {
                            err = err.with_header(name, value);
                        }
                        Err(ExecuteError::Query(err))
                    }
                    Outcome::Internal(message) => {
                        Err(ExecuteError::Internal(anyhow::anyhow!(message)))
                    }
                }
            })
        }
    }

    fn bridge_with(outcome: Outcome) -> (QueryBridge<MockExecutor>, Arc<Mutex<Vec<(Method, QueryPayload, String)>>>) {
        let (executor, calls) = MockExecutor::new(outcome);
        let bridge = QueryBridge::builder(executor)
            .options("opts".to_string())
            .build()
            .unwrap();
        (bridge, calls)
    }

    fn ctx() -> RequestContext {
        RequestContext::new("inv-1")
    }

    #[tokio::test]
    async fn successful_execution_yields_json_200() {
        let (bridge, calls) = bridge_with(Outcome::Data(json!({"data": {"hello": "world"}})));
        let request =
            FunctionRequest::post(Value::String(r#"{"query":"{ hello }"}"#.into()));

        let resp = bridge.handle(&ctx(), &request).await.unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(resp.body, r#"{"data":{"hello":"world"}}"#);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (method, payload, options) = &calls[0];
        assert_eq!(method, &Method::POST);
        assert_eq!(payload.query.as_deref(), Some("{ hello }"));
        assert_eq!(options, "opts");
    }

    #[tokio::test]
    async fn recognized_failure_is_translated() {
        let (bridge, calls) = bridge_with(Outcome::Failure {
            status: StatusCode::BAD_REQUEST,
            headers: vec![],
            message: "Syntax Error",
        });
        let mut params = HashMap::new();
        params.insert("query".to_string(), "{bad syntax".to_string());
        let request = FunctionRequest::get(params);

        let resp = bridge.handle(&ctx(), &request).await.unwrap();

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, "Syntax Error");

        // The bad-syntax text reached the engine untouched.
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1.query.as_deref(), Some("{bad syntax"));
    }

    #[tokio::test]
    async fn recognized_failure_headers_are_adopted() {
        let (bridge, _) = bridge_with(Outcome::Failure {
            status: StatusCode::METHOD_NOT_ALLOWED,
            headers: vec![("allow", "GET, POST")],
            message: "method not supported",
        });
        let request = FunctionRequest::get(HashMap::new());

        let resp = bridge.handle(&ctx(), &request).await.unwrap();

        assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers.get("allow").unwrap(), "GET, POST");
        assert_eq!(resp.body, "method not supported");
    }

    #[tokio::test]
    async fn unrecognized_failure_propagates() {
        let (bridge, _) = bridge_with(Outcome::Internal("connection pool exhausted"));
        let request = FunctionRequest::get(HashMap::new());

        let err = bridge.handle(&ctx(), &request).await.unwrap_err();
        assert_eq!(err.to_string(), "connection pool exhausted");
    }

    #[tokio::test]
    async fn derived_options_resolve_per_invocation() {
        let (executor, calls) = MockExecutor::new(Outcome::Data(json!(null)));
        let bridge = QueryBridge::builder(executor)
            .options_with(OptionsSource::derived(|ctx: &RequestContext| {
                format!("opts-for-{}", ctx.invocation_id)
            }))
            .build()
            .unwrap();

        let request = FunctionRequest::get(HashMap::new());
        bridge
            .handle(&RequestContext::new("inv-9"), &request)
            .await
            .unwrap();

        assert_eq!(calls.lock().unwrap()[0].2, "opts-for-inv-9");
    }

    #[test]
    fn build_without_options_fails() {
        let (executor, _) = MockExecutor::new(Outcome::Data(json!(null)));
        let err = QueryBridge::builder(executor).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingOptions);
    }

    #[test]
    fn build_with_two_sources_fails() {
        let (executor, _) = MockExecutor::new(Outcome::Data(json!(null)));
        let err = QueryBridge::builder(executor)
            .options("a".to_string())
            .options("b".to_string())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ConflictingOptions(2));
    }
}
