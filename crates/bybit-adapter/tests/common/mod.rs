/*
[INPUT]:  Canned responses and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bybit-adapter tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bybit_adapter::http::{HttpRequest, RawResponse, Transport};
use bybit_adapter::{BybitClient, ClientConfig, Credentials, Result};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_SECRET: &str = "test-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET)
}

/// Async client pointed at a wiremock server
pub fn mock_client(server: &MockServer) -> BybitClient {
    BybitClient::with_config(
        test_credentials(),
        ClientConfig::default().with_base_url(server.uri()),
    )
    .expect("client init")
}

/// Bybit envelope with `retCode = 0`
pub fn ok_envelope(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "retCode": 0,
        "retMsg": "OK",
        "result": result,
        "time": 1_700_000_000_000u64
    })
}

/// Transport that records every request and replays queued responses.
///
/// Once the queue is drained the fallback response is returned for every call.
#[derive(Debug)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<RawResponse>>,
    fallback: RawResponse,
}

impl MockTransport {
    pub fn new(fallback: RawResponse) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            fallback,
        })
    }

    pub fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Client over a `MockTransport`, returning both
pub fn client_with_transport(fallback: RawResponse) -> (BybitClient, Arc<MockTransport>) {
    let transport = MockTransport::new(fallback);
    let client = BybitClient::with_transport(
        test_credentials(),
        ClientConfig::default().with_base_url("https://api.bybit.com"),
        transport.clone(),
    )
    .expect("client init");
    (client, transport)
}
