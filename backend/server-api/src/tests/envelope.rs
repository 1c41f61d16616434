use crate::envelope::{decode, encode};

use models::{Acknowledged, ApiFunction, HealthCheckResponse, NoData, SaveNameRequest};

use serde_json::{Value, json};

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("encoded envelope should be valid JSON")
}

/// **VALUE**: The server dispatches on the exact `function` string and reads
/// the payload from `data`.
///
/// **BUG THIS CATCHES**: Would catch a renamed envelope field or payload
/// fields losing their camelCase names.
#[test]
fn given_payload_when_encoded_then_envelope_has_function_and_camel_case_data() {
    // GIVEN: A SaveGame request
    let request = SaveNameRequest {
        save_name: "Factory_01".to_string(),
    };

    // WHEN: Encoding it
    let bytes = encode(ApiFunction::SaveGame, &request).unwrap();

    // THEN: The envelope carries both fields
    assert_eq!(
        parse(&bytes),
        json!({"function": "SaveGame", "data": {"saveName": "Factory_01"}})
    );
}

/// **VALUE**: Functions without arguments must still send a `data` object.
///
/// **BUG THIS CATCHES**: Would catch `()` being sent as `"data": null`, which
/// the server rejects as a malformed request.
#[test]
fn given_unit_or_no_data_when_encoded_then_data_is_empty_object() {
    let from_unit = parse(&encode(ApiFunction::QueryServerState, &()).unwrap());
    let from_marker = parse(&encode(ApiFunction::QueryServerState, &NoData::default()).unwrap());

    assert_eq!(from_unit["data"], json!({}));
    assert_eq!(from_marker["data"], json!({}));
}

#[test]
fn given_payload_with_non_string_map_keys_when_encoded_then_returns_encode_error() {
    let mut bad = std::collections::HashMap::new();
    bad.insert((1, 2), "value");

    let error = encode(ApiFunction::ApplyServerOptions, &bad).unwrap_err();

    assert_eq!(error.error_category(), "encode");
}

/// **VALUE**: Most replies wrap the payload in `data`; only that sub-tree is decoded.
#[test]
fn given_wrapped_body_when_decoded_then_data_field_is_unwrapped() {
    let body = br#"{"data":{"health":"healthy","serverCustomData":"x"}}"#;

    let response: HealthCheckResponse = decode(body).unwrap();

    assert_eq!(response.health, "healthy");
    assert_eq!(response.server_custom_data, "x");
}

/// **VALUE**: Some replies are not wrapped; the whole body is the payload.
///
/// **BUG THIS CATCHES**: Would catch a decoder that insists on `data` and
/// fails every unwrapped reply.
#[test]
fn given_unwrapped_body_when_decoded_then_whole_body_is_used() {
    let response: HealthCheckResponse = decode(br#"{"health":"slow"}"#).unwrap();

    assert_eq!(response.health, "slow");
}

/// **VALUE**: `VerifyAuthenticationToken` and friends answer 204 with no body.
///
/// **BUG THIS CATCHES**: Would catch an empty body being reported as a JSON
/// syntax error instead of success.
#[test]
fn given_empty_or_blank_body_when_decoded_as_acknowledged_then_succeeds() {
    assert!(decode::<Acknowledged>(b"").is_ok());
    assert!(decode::<Acknowledged>(b"  \r\n").is_ok());
    assert!(decode::<Acknowledged>(b"{}").is_ok());
}

#[test]
fn given_invalid_json_when_decoded_then_returns_decode_error() {
    let error = decode::<HealthCheckResponse>(b"<html>oops</html>").unwrap_err();

    assert_eq!(error.error_category(), "decode");
    assert!(!error.is_retryable());
}

#[test]
fn given_wrong_shape_when_decoded_then_returns_decode_error() {
    let error = decode::<HealthCheckResponse>(br#"{"data":{"health":42}}"#).unwrap_err();

    assert_eq!(error.error_category(), "decode");
}

#[test]
fn given_empty_body_when_decoded_as_payload_then_returns_decode_error() {
    assert!(decode::<HealthCheckResponse>(b"").is_err());
}
