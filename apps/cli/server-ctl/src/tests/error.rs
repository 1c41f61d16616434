use crate::error::CtlError;

use server_api::ApiError;

/// **VALUE**: Errors serialize so wrapping scripts can parse failures.
///
/// **BUG THIS CATCHES**: Would catch a non-serializable field sneaking into `CtlError`.
#[test]
fn given_ctl_error_when_serialized_then_contains_variant_and_message() {
    let err = CtlError::ctl("Test");

    let json = serde_json::to_string(&err).unwrap();

    assert!(json.contains("Ctl"), "JSON should contain variant name");
    assert!(json.contains("Test"), "JSON should contain message");
}

#[test]
fn given_insufficient_scope_api_error_when_converted_then_flag_kept() {
    let api = ApiError::http(403, r#"{"errorCode":"insufficient_scope"}"#);

    let err = CtlError::from(api);

    assert!(err.is_insufficient_scope());
    assert!(!err.is_cancelled());
}

#[test]
fn given_cancelled_api_error_when_converted_then_reported_as_cancelled() {
    let err = CtlError::from(ApiError::cancelled());

    assert!(err.is_cancelled());
    assert!(!err.is_insufficient_scope());
}
