//! Test doubles for the transport and clock ports
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream crates.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use easemob_domain::{ClientConfig, TransportError, TransportErrorKind};
use parking_lot::Mutex;
use serde_json::Value;

use crate::auth::Clock;
use crate::client::EasemobClient;
use crate::transport::{ApiRequest, RawResponse, Transport};

type Scripted = std::result::Result<RawResponse, TransportError>;

/// In-memory transport answering from a queue and recording every request
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enqueue(&self, response: RawResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a JSON body with the given status
    pub fn enqueue_json(&self, status: u16, body: Value) {
        self.enqueue(RawResponse::new(status, body.to_string()));
    }

    pub fn enqueue_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<RawResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(TransportError::new(TransportErrorKind::Other, "no scripted response left"))
        })
    }
}

/// Clock frozen at a fixed unix time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// Complete configuration pointing at a placeholder host
pub fn test_config() -> ClientConfig {
    ClientConfig::new("a1.easemob.test", "demo-org", "chat", "YXA6client", "YXA6secret")
}

/// Client wired to `transport` with [`test_config`]
pub fn client_with(transport: Arc<RecordingTransport>) -> EasemobClient {
    match EasemobClient::new(test_config(), transport) {
        Ok(client) => client,
        Err(err) => panic!("test configuration rejected: {err}"),
    }
}
