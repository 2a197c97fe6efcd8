//! The explorer page handler.
//!
//! Serves the interactive query-exploration page, pre-filled from request
//! parameters. Render failures never escape this handler — both outcomes
//! of the renderer call become a response.

use std::sync::Arc;

use http::StatusCode;
use tracing::warn;

use funcql_core::{
    ExplorerData, ExplorerRenderer, FunctionRequest, FunctionResponse, OptionsSource,
    RequestContext,
};

/// Serves the query-exploration page.
pub struct ExplorerHandler<R: ExplorerRenderer> {
    renderer: Arc<R>,
    data: OptionsSource<ExplorerData>,
}

impl<R: ExplorerRenderer> ExplorerHandler<R> {
    /// Create a handler around the given renderer and page-data source.
    pub fn new(renderer: R, data: impl Into<OptionsSource<ExplorerData>>) -> Self {
        Self {
            renderer: Arc::new(renderer),
            data: data.into(),
        }
    }

    /// Handle one invocation.
    ///
    /// Infallible by contract: a successful render completes with the page,
    /// a failed one with a bare 500 carrying the failure's message.
    pub async fn handle(
        &self,
        ctx: &RequestContext,
        request: &FunctionRequest,
    ) -> FunctionResponse {
        let data = self.data.resolve(ctx).await;

        match self
            .renderer
            .render(&request.query, &data, ctx, request)
            .await
        {
            Ok(html) => FunctionResponse::html(html),
            Err(err) => {
                warn!(
                    invocation = %ctx.invocation_id,
                    error = %err,
                    "explorer page render failed"
                );
                FunctionResponse::text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}
