use crate::HttpStatusCode;

#[test]
fn given_status_ranges_when_classified_then_client_and_server_errors_are_disjoint() {
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
    assert!(!HttpStatusCode(204).is_client_error());
}

/// **VALUE**: The server reports missing privilege as 401/403; callers key the
/// "elevate privileges" hint off this check.
#[test]
fn given_auth_statuses_when_checked_then_only_401_and_403_are_auth_rejections() {
    assert!(HttpStatusCode(401).is_auth_rejection());
    assert!(HttpStatusCode(403).is_auth_rejection());
    assert!(!HttpStatusCode(400).is_auth_rejection());
    assert!(!HttpStatusCode(500).is_auth_rejection());
}

#[test]
fn given_status_when_displayed_then_prints_bare_number() {
    assert_eq!(HttpStatusCode::from(418).to_string(), "418");
}
