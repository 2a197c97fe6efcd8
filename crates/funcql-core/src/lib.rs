//! funcql-core — boundary types for the FuncQL adapter.
//!
//! Defines the platform-facing request/response model, the GraphQL
//! operation payload, the options sources handed to handlers, the error
//! taxonomy, and the collaborator traits (execution engine, explorer page
//! renderer). Contains no I/O; the handlers live in `funcql-trigger`.

pub mod collaborators;
pub mod error;
pub mod options;
pub mod payload;
pub mod request;

pub use collaborators::{ExplorerData, ExplorerRenderer, QueryExecutor};
pub use error::{ConfigError, ExecuteError, HttpQueryError};
pub use options::{BoxFuture, OptionsFactory, OptionsSource};
pub use payload::QueryPayload;
pub use request::{FunctionRequest, FunctionResponse, RequestContext};
