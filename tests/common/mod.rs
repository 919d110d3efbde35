//! Common test utilities and helpers
//!
//! Shared utilities for the integration suites: a `TestServer` builder
//! wired to a fresh in-memory `AppState`, and envelope helpers.

use axum_test::TestServer;
use chatstream::backend::routes::create_router;
use chatstream::backend::server::AppState;

/// Build a test server over a fresh application state
///
/// Returns the state alongside the server so tests can reach the stream
/// registry and message store directly.
pub fn create_test_server() -> (TestServer, AppState) {
    let state = AppState::new();
    let server = TestServer::new(create_router(state.clone())).unwrap();
    (server, state)
}

/// A small, valid message envelope as the client would publish it
///
/// Not every suite publishes envelopes.
#[allow(dead_code)]
pub fn sample_envelope() -> String {
    r#"{"id":"m1","message":"hi"}"#.to_string()
}
