//! Shared fixtures for client integration tests.
//!
//! wiremock speaks plain HTTP, so endpoints built here use [`Scheme::Http`].

use models::{EndpointBuilder, Scheme};
use server_api::{ApiClient, ApiClientBuilder, RetryPolicy};

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use wiremock::MockServer;

pub const APP_TOKEN: &str = "app-token-123";
pub const SESSION_TOKEN: &str = "session-token-456";

/// Retry policy fast enough for real-clock tests.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

pub fn client_for(server: &MockServer) -> ApiClient {
    client_builder_for(server)
        .build()
        .expect("client should build")
}

pub fn client_builder_for(server: &MockServer) -> ApiClientBuilder {
    let address = server.address();
    let endpoint = EndpointBuilder::default()
        .with_host(address.ip().to_string())
        .with_port(address.port())
        .with_scheme(Scheme::Http)
        .build()
        .expect("loopback endpoint should be valid");

    ApiClient::builder()
        .endpoint(endpoint)
        .retry_policy(fast_retry())
}

/// Client pointed at a loopback port nothing listens on.
pub fn client_for_refused_port(retry: RetryPolicy) -> ApiClient {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };

    client_for_port(port, retry)
}

pub fn client_for_port(port: u16, retry: RetryPolicy) -> ApiClient {
    let endpoint = EndpointBuilder::default()
        .with_host("127.0.0.1")
        .with_port(port)
        .with_scheme(Scheme::Http)
        .build()
        .expect("loopback endpoint should be valid");

    ApiClient::builder()
        .endpoint(endpoint)
        .retry_policy(retry)
        .build()
        .expect("client should build")
}

/// Loopback server that answers every request with `status_line`, promises a
/// 100 byte body, writes only `partial_body` and hangs up.
///
/// Returns the port and a counter of accepted connections.
pub fn spawn_truncating_server(
    status_line: &'static str,
    partial_body: &'static str,
) -> (u16, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    let accepted = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&accepted);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            counter.fetch_add(1, Ordering::SeqCst);

            drain_request(&mut stream);
            let reply = format!("{status_line}\r\nContent-Length: 100\r\n\r\n{partial_body}");
            let _ = stream.write_all(reply.as_bytes());
            let _ = stream.flush();
        }
    });

    (port, accepted)
}

/// Read one request, headers plus `Content-Length` body, before replying.
fn drain_request(stream: &mut TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut received = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let read = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(read) => read,
        };
        received.extend_from_slice(&chunk[..read]);

        let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&received[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if received.len() >= header_end + 4 + content_length {
            return;
        }
    }
}
