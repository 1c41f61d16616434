use crate::auth::{AuthContext, Credential};

/// **VALUE**: The application token wins whenever both are held.
///
/// **WHY THIS MATTERS**: Session tokens are invalidated by server restarts and
/// admin password changes; the application token is the stable identity.
///
/// **BUG THIS CATCHES**: Would catch a login silently replacing a configured
/// application token in outgoing headers.
#[test]
fn given_both_tokens_when_credential_resolved_then_application_token_wins() {
    // GIVEN: Both tokens set
    let mut auth = AuthContext::with_application_token("app-token");
    auth.set_session_token(Some("session-token".to_string()));

    // WHEN: Resolving the credential
    let credential = auth.credential();

    // THEN: Application token is used
    assert_eq!(credential.kind(), "application");
    assert_eq!(
        auth.authorization_header().as_deref(),
        Some("Bearer app-token")
    );
}

#[test]
fn given_only_session_token_when_credential_resolved_then_session_token_used() {
    let mut auth = AuthContext::new();
    auth.set_session_token(Some("session-token".to_string()));

    assert!(matches!(auth.credential(), Credential::SessionToken(_)));
    assert_eq!(
        auth.authorization_header().as_deref(),
        Some("Bearer session-token")
    );
}

#[test]
fn given_no_tokens_when_credential_resolved_then_no_header() {
    let auth = AuthContext::new();

    assert!(auth.credential().is_none());
    assert!(auth.authorization_header().is_none());
}

/// **VALUE**: Blank tokens from config or env are the same as no token.
///
/// **BUG THIS CATCHES**: Would catch `Authorization: Bearer ` being sent for
/// an empty config value, which the server rejects with 401 instead of
/// treating the call as anonymous.
#[test]
fn given_blank_tokens_when_set_then_treated_as_absent() {
    let mut auth = AuthContext::with_application_token("   ");
    auth.set_session_token(Some(String::new()));

    assert!(!auth.has_application_token());
    assert!(!auth.has_session_token());
    assert!(auth.credential().is_none());
}

#[test]
fn given_application_token_removed_when_session_held_then_falls_back_to_session() {
    let mut auth = AuthContext::with_application_token("app");
    auth.set_session_token(Some("session".to_string()));

    auth.set_application_token(None);

    assert_eq!(auth.credential().kind(), "session");
}

#[test]
fn given_tokens_when_cleared_then_no_credential_remains() {
    let mut auth = AuthContext::with_application_token("app");
    auth.set_session_token(Some("session".to_string()));

    auth.clear();

    assert!(auth.credential().is_none());
}

#[test]
fn given_credential_when_debug_formatted_then_token_is_hidden() {
    let auth = AuthContext::with_application_token("very-secret");

    let debug = format!("{auth:?} {:?}", auth.credential());

    assert!(!debug.contains("very-secret"));
}
