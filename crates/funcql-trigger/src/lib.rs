//! funcql-trigger — GraphQL trigger handlers for FuncQL.
//!
//! Bridges inbound HTTP requests from a serverless runtime to an external
//! GraphQL execution engine, and serves the interactive query-exploration
//! page. Each request is one independent invocation: payload extraction,
//! delegation, response translation, completion.
//!
//! # Architecture
//!
//! ```text
//! HTTP client
//!   │
//!   ▼
//! hyper host shim (serve)
//!   │
//!   ├── Convert hyper::Request → FunctionRequest
//!   ├── /graphql  → QueryBridge  → QueryExecutor collaborator
//!   ├── /graphiql → ExplorerHandler → ExplorerRenderer collaborator
//!   ├── Convert FunctionResponse → hyper::Response
//!   │
//!   ▼
//! HTTP response
//! ```
//!
//! The bridge itself is platform-free: it produces a result, and the shim
//! owns the completion mechanics (exactly one completion per invocation,
//! generic 500 for propagated failures).

pub mod bridge;
pub mod convert;
pub mod explorer;
pub mod extract;
pub mod serve;

pub use bridge::{QueryBridge, QueryBridgeBuilder};
pub use explorer::ExplorerHandler;
pub use serve::{
    EXPLORER_ROUTE, FunctionHandler, FunctionHost, GRAPHQL_ROUTE, bridge_handler,
    explorer_handler,
};
