//! Function host shim.
//!
//! `FunctionHost` manages a hyper HTTP server that forwards requests to
//! the FuncQL handlers and owns the platform completion mechanics: a
//! handler produces a result, the shim turns it into exactly one HTTP
//! completion. Propagated (unrecognized) failures take the generic
//! failure path — an error log and a bare 500.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use funcql_core::{
    BoxFuture, ExplorerRenderer, FunctionRequest, FunctionResponse, QueryExecutor, RequestContext,
};

use crate::bridge::QueryBridge;
use crate::convert;
use crate::explorer::ExplorerHandler;

/// Route to the GraphQL bridge.
pub const GRAPHQL_ROUTE: &str = "/graphql";

/// Route to the explorer page.
pub const EXPLORER_ROUTE: &str = "/graphiql";

/// Callback type for handling one invocation.
///
/// Wraps a handler into the shape the host dispatches to. The contract:
/// return exactly one response, or an error to propagate instead.
pub type FunctionHandler = Arc<
    dyn Fn(RequestContext, FunctionRequest) -> BoxFuture<'static, anyhow::Result<FunctionResponse>>
        + Send
        + Sync,
>;

/// Wrap a [`QueryBridge`] into a [`FunctionHandler`].
pub fn bridge_handler<E>(bridge: QueryBridge<E>) -> FunctionHandler
where
    E: QueryExecutor + 'static,
    E::Options: 'static,
{
    let bridge = Arc::new(bridge);
    Arc::new(move |ctx, request| {
        let bridge = bridge.clone();
        Box::pin(async move { bridge.handle(&ctx, &request).await })
    })
}

/// Wrap an [`ExplorerHandler`] into a [`FunctionHandler`].
pub fn explorer_handler<R>(handler: ExplorerHandler<R>) -> FunctionHandler
where
    R: ExplorerRenderer + 'static,
{
    let handler = Arc::new(handler);
    Arc::new(move |ctx, request| {
        let handler = handler.clone();
        Box::pin(async move { Ok(handler.handle(&ctx, &request).await) })
    })
}

/// Routing table plus the invocation counter.
struct Routes {
    graphql: FunctionHandler,
    explorer: Option<FunctionHandler>,
    invocations: AtomicU64,
}

impl Routes {
    /// Dispatch one inbound request and produce its completion.
    async fn dispatch<B>(&self, req: Request<B>, peer_addr: SocketAddr) -> Response<Full<Bytes>>
    where
        B: hyper::body::Body,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let handler = match req.uri().path() {
            GRAPHQL_ROUTE => Some(&self.graphql),
            EXPLORER_ROUTE => self.explorer.as_ref(),
            _ => None,
        };
        let Some(handler) = handler else {
            return convert::http_response(FunctionResponse::text(
                StatusCode::NOT_FOUND,
                "Not Found",
            ));
        };

        let request = match convert::function_request(req).await {
            Ok(request) => request,
            Err(e) => {
                return convert::http_response(FunctionResponse::text(
                    StatusCode::BAD_REQUEST,
                    e.to_string(),
                ));
            }
        };

        let seq = self.invocations.fetch_add(1, Ordering::Relaxed);
        let ctx = RequestContext::new(format!("inv-{seq}"));

        match handler(ctx, request).await {
            Ok(resp) => convert::http_response(resp),
            Err(e) => {
                error!(%peer_addr, error = %e, "request handler failed");
                convert::http_response(FunctionResponse::text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                ))
            }
        }
    }
}

/// Serverless function host.
///
/// Binds to a TCP port and forwards incoming HTTP requests to the
/// configured handlers. Spawns a tokio task per connection using
/// HTTP/1.1.
pub struct FunctionHost {
    bind_addr: SocketAddr,
    graphql: FunctionHandler,
    explorer: Option<FunctionHandler>,
}

impl FunctionHost {
    /// Create a host serving the given GraphQL bridge handler.
    pub fn new(bind_addr: SocketAddr, graphql: FunctionHandler) -> Self {
        Self {
            bind_addr,
            graphql,
            explorer: None,
        }
    }

    /// Also serve the explorer page at [`EXPLORER_ROUTE`].
    pub fn with_explorer(mut self, explorer: FunctionHandler) -> Self {
        self.explorer = Some(explorer);
        self
    }

    /// Start the HTTP server.
    ///
    /// Runs until the shutdown signal is received.
    pub async fn serve(
        self,
        mut shutdown: tokio::sync::watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .context("failed to bind function host")?;

        info!(addr = %self.bind_addr, "function host listening");

        let routes = Arc::new(Routes {
            graphql: self.graphql,
            explorer: self.explorer,
            invocations: AtomicU64::new(0),
        });

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    let (stream, peer_addr) = accept_result.context("accept failed")?;
                    let routes = routes.clone();

                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let svc = service_fn(move |req: Request<Incoming>| {
                            let routes = routes.clone();
                            async move {
                                Ok::<_, hyper::Error>(routes.dispatch(req, peer_addr).await)
                            }
                        });

                        if let Err(e) = http1::Builder::new()
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(%peer_addr, error = %e, "connection error");
                        }
                    });
                }
                _ = shutdown.changed() => {
                    info!("function host shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}
