//! User-info fetches against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with a fixture set covering every
//! failure mode, then drives `fetch_user_info` over real HTTP through ureq.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use mallkit_core::{fetch_user_info, UserInfoClient, UserInfoError};
use mock_server::{Fixture, StatusCode};
use serde_json::json;

fn fixtures() -> HashMap<String, Fixture> {
    let mut fixtures = mock_server::seed();
    fixtures.insert(
        "test_500".to_string(),
        Fixture::raw(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    );
    fixtures.insert(
        "test_invalid_json".to_string(),
        Fixture::raw(StatusCode::OK, "This is not JSON"),
    );
    fixtures.insert(
        "test_timeout".to_string(),
        Fixture::user(json!({"userId": "test_timeout"})).delayed(Duration::from_secs(5)),
    );
    fixtures
}

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, fixtures()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn fetch_lifecycle() {
    let addr = start_server();
    let client = UserInfoClient::new(&format!("http://{addr}"), Duration::from_secs(2));

    // Known user decodes to its record.
    let user = fetch_user_info(&client, "mall001").unwrap();
    assert_eq!(user["userId"], "mall001");
    assert_eq!(user["name"], "Kim Minji");

    // Non-ASCII survives the round-trip.
    let user = fetch_user_info(&client, "mall002").unwrap();
    assert_eq!(user["name"], "김민지");

    // Unknown user is a status error carrying the body.
    let err = fetch_user_info(&client, "nobody").unwrap_err();
    assert_eq!(
        err.to_string(),
        "API request failed with status code 404: Not Found"
    );

    // Server error.
    let err = fetch_user_info(&client, "test_500").unwrap_err();
    assert!(matches!(err, UserInfoError::Status { status: 500, .. }));

    // 200 with a non-JSON body.
    let err = fetch_user_info(&client, "test_invalid_json").unwrap_err();
    match err {
        UserInfoError::Decode { mall_id, snippet, .. } => {
            assert_eq!(mall_id, "test_invalid_json");
            assert_eq!(snippet, "This is not JSON");
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[test]
fn slow_endpoint_times_out() {
    let addr = start_server();
    let client = UserInfoClient::new(&format!("http://{addr}"), Duration::from_millis(300));

    let err = fetch_user_info(&client, "test_timeout").unwrap_err();
    assert!(matches!(err, UserInfoError::Timeout { .. }), "got {err:?}");
    assert_eq!(err.to_string(), "API request timed out for mallid: test_timeout");
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = UserInfoClient::new(&format!("http://{addr}"), Duration::from_secs(2));

    let err = fetch_user_info(&client, "test_connect_error").unwrap_err();
    assert!(matches!(err, UserInfoError::Transport { .. }), "got {err:?}");
    assert!(err
        .to_string()
        .starts_with("API request failed for mallid test_connect_error: "));
}
