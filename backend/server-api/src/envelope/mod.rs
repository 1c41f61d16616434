//! Request/response envelope codec.
//!
//! Requests are `{"function": "<Name>", "data": {...}}` as compact JSON.
//! Responses are normally `{"data": {...}}`; some functions answer with the
//! payload unwrapped and some with no body at all. [`decode`] accepts all
//! three and reports anything else as [`ApiError::Decode`].

use crate::error::ApiError;

use models::ApiFunction;

use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub const FUNCTION_FIELD: &str = "function";
pub const DATA_FIELD: &str = "data";

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    function: &'a str,
    data: Value,
}

/// Serialize `data` into a request envelope for `function`.
///
/// Payloads that serialize to `null` (such as `()`) are sent as `{}`.
#[track_caller]
pub fn encode<D>(function: ApiFunction, data: &D) -> Result<Vec<u8>, ApiError>
where
    D: Serialize + ?Sized,
{
    let data = match serde_json::to_value(data) {
        Ok(Value::Null) => Value::Object(Map::new()),
        Ok(value) => value,
        Err(e) => return Err(ApiError::encode(format!("{function} payload: {e}"))),
    };

    let envelope = RequestEnvelope {
        function: function.as_str(),
        data,
    };

    serde_json::to_vec(&envelope).map_err(|e| ApiError::encode(format!("{function} envelope: {e}")))
}

/// Decode a 2xx response body into `T`.
///
/// 1. An empty body decodes as JSON `null` (the no-content case).
/// 2. A top-level `data` field is unwrapped and only that sub-tree is decoded.
/// 3. Otherwise the whole body is decoded.
#[track_caller]
pub fn decode<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        trace!("Empty response body, decoding as null");
        Value::Null
    } else {
        serde_json::from_slice::<Value>(body)
            .map_err(|e| ApiError::decode(format!("response is not valid JSON: {e}")))?
    };

    let payload = match value {
        Value::Object(mut map) => match map.remove(DATA_FIELD) {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };

    serde_json::from_value(payload)
        .map_err(|e| ApiError::decode(format!("unexpected response shape: {e}")))
}
