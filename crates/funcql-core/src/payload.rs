//! GraphQL operation payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One GraphQL operation description extracted from a request.
///
/// All fields are optional at this layer — whether a missing query text is
/// acceptable is the execution engine's decision, not the adapter's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// The GraphQL query text.
    pub query: Option<String>,
    /// Operation variables.
    pub variables: Option<Value>,
    /// Name of the operation to run when the document holds several.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
}

impl QueryPayload {
    /// Build a payload holding only query text.
    pub fn from_text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    /// Pick the payload fields out of a structured JSON object.
    ///
    /// Unknown keys are ignored; a `query` or `operationName` that is not a
    /// string is treated as absent.
    pub fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            query: map.get("query").and_then(Value::as_str).map(str::to_owned),
            variables: map.get("variables").cloned(),
            operation_name: map
                .get("operationName")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// True when no field of the payload is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.variables.is_none() && self.operation_name.is_none()
    }
}
