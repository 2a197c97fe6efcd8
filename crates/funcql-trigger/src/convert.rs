//! HTTP type conversions between hyper and the platform shapes.
//!
//! Converts inbound hyper requests into [`FunctionRequest`] values and
//! outbound [`FunctionResponse`] values back into hyper responses.

use std::collections::HashMap;

use anyhow::Context;
use bytes::Bytes;
use http::Request;
use http::header::CONTENT_TYPE;
use http_body_util::{BodyExt, Full};
use hyper::Response;
use serde_json::Value;

use funcql_core::{FunctionRequest, FunctionResponse};

/// Convert an inbound hyper request.
///
/// The query string is percent-decoded into a mapping. The body is
/// delivered as structured JSON when the request declares
/// `application/json` and the bytes parse; as text otherwise; absent when
/// empty.
pub async fn function_request<B>(req: Request<B>) -> anyhow::Result<FunctionRequest>
where
    B: hyper::body::Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let method = req.method().clone();
    let query = parse_query_string(req.uri().query().unwrap_or(""));
    let declares_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    let bytes = req
        .into_body()
        .collect()
        .await
        .context("failed to read request body")?
        .to_bytes();

    let body = if bytes.is_empty() {
        None
    } else {
        let text = String::from_utf8(bytes.to_vec()).context("request body is not valid UTF-8")?;
        if declares_json {
            // A declared-JSON body that does not parse is handed over as
            // text; payload extraction decides what to do with it.
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        } else {
            Some(Value::String(text))
        }
    };

    Ok(FunctionRequest {
        method,
        query,
        body,
    })
}

/// Convert an outbound response. Status, headers and body carry over
/// verbatim.
pub fn http_response(resp: FunctionResponse) -> Response<Full<Bytes>> {
    let mut out = Response::new(Full::new(Bytes::from(resp.body)));
    *out.status_mut() = resp.status;
    *out.headers_mut() = resp.headers;
    out
}

/// Parse a raw query string into decoded key-value pairs.
pub fn parse_query_string(raw: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for pair in raw.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            map.insert(url_decode(key), url_decode(value));
        }
    }
    map
}

/// Decode a URL-encoded string, handling %XX sequences and '+' as space.
fn url_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut chars = s.bytes();
    while let Some(b) = chars.next() {
        match b {
            b'+' => bytes.push(b' '),
            b'%' => {
                let hi = chars.next().unwrap_or(b'0');
                let lo = chars.next().unwrap_or(b'0');
                let byte = hex_val(hi) * 16 + hex_val(lo);
                bytes.push(byte);
            }
            _ => bytes.push(b),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
