//! GraphQL payload extraction.
//!
//! Selects the raw payload source by method (POST body, query-string
//! mapping otherwise) and normalizes it into a [`QueryPayload`] before
//! delegation. Textual values are decoded as JSON when they parse as a
//! JSON object; anything else is passed through as raw query text for the
//! execution engine to judge. Extraction never fails — malformed input
//! surfaces later as the engine's own (recognized) error.

use std::collections::HashMap;

use http::Method;
use serde_json::Value;

use funcql_core::{FunctionRequest, QueryPayload};

/// Extract the operation payload from one request.
pub fn graphql_payload(request: &FunctionRequest) -> QueryPayload {
    if request.method == Method::POST {
        match &request.body {
            None => QueryPayload::default(),
            Some(Value::String(text)) => payload_from_text(text),
            Some(value) => payload_from_value(value),
        }
    } else {
        payload_from_params(&request.query)
    }
}

/// Decode a textual payload.
///
/// A JSON object is the common case (`'{"query":"{ hello }"}'`). Plain
/// GraphQL text is not JSON-shaped and travels onward as the query itself.
fn payload_from_text(text: &str) -> QueryPayload {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => QueryPayload::from_object(&map),
        _ => QueryPayload::from_text(text),
    }
}

/// Read the payload fields out of an already-structured body.
fn payload_from_value(value: &Value) -> QueryPayload {
    match value {
        Value::Object(map) => QueryPayload::from_object(map),
        // Non-object structured bodies carry no recognizable operation;
        // the engine rejects the empty payload.
        _ => QueryPayload::default(),
    }
}

/// Build the payload from the query-string mapping.
///
/// The `query` parameter may carry the whole payload JSON-encoded; a
/// `variables` parameter is itself a textual encoding and is decoded when
/// it parses.
fn payload_from_params(params: &HashMap<String, String>) -> QueryPayload {
    if let Some(text) = params.get("query") {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
            return QueryPayload::from_object(&map);
        }
    }

    QueryPayload {
        query: params.get("query").cloned(),
        variables: params.get("variables").map(|raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
        }),
        operation_name: params.get("operationName").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn post_textual_json_body_is_decoded() {
        let request = FunctionRequest::post(Value::String(
            r#"{"query":"{ hello }","variables":{"limit":5}}"#.into(),
        ));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("{ hello }"));
        assert_eq!(payload.variables, Some(json!({"limit": 5})));
    }

    #[test]
    fn post_structured_body_passes_through() {
        let request = FunctionRequest::post(json!({
            "query": "{ hello }",
            "operationName": "Hello",
        }));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("{ hello }"));
        assert_eq!(payload.operation_name.as_deref(), Some("Hello"));
    }

    #[test]
    fn post_plain_text_body_becomes_query_text() {
        let request = FunctionRequest::post(Value::String("{ hello }".into()));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("{ hello }"));
        assert!(payload.variables.is_none());
    }

    #[test]
    fn post_invalid_json_text_is_passed_through_not_rejected() {
        // "{bad" starts JSON-shaped but does not parse; it travels onward
        // as query text and the engine reports the syntax error.
        let request = FunctionRequest::post(Value::String("{bad".into()));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("{bad"));
    }

    #[test]
    fn post_without_body_yields_empty_payload() {
        let request = FunctionRequest {
            method: Method::POST,
            query: HashMap::new(),
            body: None,
        };
        assert!(graphql_payload(&request).is_empty());
    }

    #[test]
    fn post_non_object_structured_body_yields_empty_payload() {
        let request = FunctionRequest::post(json!([1, 2, 3]));
        assert!(graphql_payload(&request).is_empty());
    }

    #[test]
    fn get_params_map_to_fields() {
        let request = FunctionRequest::get(params(&[
            ("query", "query Hello { hello }"),
            ("variables", r#"{"limit":5}"#),
            ("operationName", "Hello"),
        ]));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("query Hello { hello }"));
        assert_eq!(payload.variables, Some(json!({"limit": 5})));
        assert_eq!(payload.operation_name.as_deref(), Some("Hello"));
    }

    #[test]
    fn get_query_param_holding_full_payload_is_decoded() {
        let encoded = r#"{"query":"{ hello }","operationName":"Hello"}"#;
        let request = FunctionRequest::get(params(&[("query", encoded)]));
        let payload = graphql_payload(&request);

        // Equal to the object parsed independently.
        let independent: Value = serde_json::from_str(encoded).unwrap();
        assert_eq!(
            payload,
            QueryPayload::from_object(independent.as_object().unwrap())
        );
    }

    #[test]
    fn get_bad_syntax_query_text_passes_through() {
        let request = FunctionRequest::get(params(&[("query", "{bad syntax")]));
        let payload = graphql_payload(&request);
        assert_eq!(payload.query.as_deref(), Some("{bad syntax"));
    }

    #[test]
    fn get_unparseable_variables_stay_textual() {
        let request = FunctionRequest::get(params(&[
            ("query", "{ hello }"),
            ("variables", "not-json"),
        ]));
        let payload = graphql_payload(&request);
        assert_eq!(payload.variables, Some(Value::String("not-json".into())));
    }

    #[test]
    fn get_without_params_yields_empty_payload() {
        let request = FunctionRequest::get(HashMap::new());
        assert!(graphql_payload(&request).is_empty());
    }
}
