use crate::{EndpointBuilder, ModelError, Scheme};

/// **VALUE**: Verifies the builder derives the single multiplexed API URL.
///
/// **WHY THIS MATTERS**: Every function call is POSTed to exactly this URL. A wrong path or
/// scheme would make every call fail with a 404 or a TLS error.
///
/// **BUG THIS CATCHES**: Would catch if the `/api/v1` suffix or the HTTPS default is lost.
#[test]
fn given_host_and_port_when_building_then_base_url_is_https_api_v1() {
    // GIVEN: Builder with host and port only
    let builder = EndpointBuilder::default()
        .with_host("game.example.net")
        .with_port(7777);

    // WHEN: Building
    let endpoint = builder.build().unwrap();

    // THEN: Base URL uses HTTPS and the versioned API path
    assert_eq!(endpoint.scheme(), Scheme::Https);
    assert_eq!(
        endpoint.base_url().as_str(),
        "https://game.example.net:7777/api/v1"
    );
    assert_eq!(endpoint.host(), "game.example.net");
    assert_eq!(endpoint.port(), 7777);
}

#[test]
fn given_missing_host_when_building_then_returns_validation_error() {
    let result = EndpointBuilder::default().with_port(7777).build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "Host is required"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_host_when_building_then_returns_validation_error() {
    let result = EndpointBuilder::default()
        .with_host("   ")
        .with_port(7777)
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Host cannot be empty")
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Hosts are bare names; pasting a full URL into the host field must be caught
/// here rather than producing `https://https://...` later.
#[test]
fn given_host_with_scheme_when_building_then_returns_validation_error() {
    let result = EndpointBuilder::default()
        .with_host("https://game.example.net")
        .with_port(7777)
        .build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_zero_port_when_building_then_returns_validation_error() {
    let result = EndpointBuilder::default()
        .with_host("127.0.0.1")
        .with_port(0)
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Port must be non-zero")
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_port_when_building_then_returns_validation_error() {
    let result = EndpointBuilder::default().with_host("127.0.0.1").build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "Port is required"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **BUG THIS CATCHES**: An unbracketed IPv6 literal followed by `:port` is not a valid URL.
#[test]
fn given_ipv6_host_when_building_then_host_is_bracketed_in_url() {
    let endpoint = EndpointBuilder::default()
        .with_host("::1")
        .with_port(7777)
        .build()
        .unwrap();

    assert_eq!(endpoint.base_url().as_str(), "https://[::1]:7777/api/v1");
    assert_eq!(endpoint.host(), "::1");
}

#[test]
fn given_http_scheme_when_building_then_base_url_uses_http() {
    let endpoint = EndpointBuilder::default()
        .with_host("127.0.0.1")
        .with_port(8080)
        .with_scheme(Scheme::Http)
        .build()
        .unwrap();

    assert_eq!(endpoint.base_url().as_str(), "http://127.0.0.1:8080/api/v1");
    assert_eq!(endpoint.to_string(), "http://127.0.0.1:8080/api/v1");
}
