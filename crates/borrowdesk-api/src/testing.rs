//! In-memory transport for gateway and facade tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::gateway::Gateway;
use crate::session::SessionStore;
use crate::transport::{
    OutgoingRequest, RawResponse, Transport, TransportError, TransportErrorKind,
};

/// Everything the mock transport was asked to send
#[derive(Clone, Default)]
pub struct SentLog(Arc<Mutex<Vec<OutgoingRequest>>>);

impl SentLog {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn get(&self, index: usize) -> OutgoingRequest {
        self.0.lock().unwrap()[index].clone()
    }

    pub fn last(&self) -> OutgoingRequest {
        self.0.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

/// Replays queued outcomes in order; answers 200 `{}` once the queue is empty
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: SentLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(self, kind: TransportErrorKind, message: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(TransportError::new(kind, message)));
        self
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.sent.0.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}

/// Gateway over the default config, a given session and a mock transport
pub fn gateway_with(
    session: impl SessionStore + 'static,
    transport: MockTransport,
) -> (Gateway, SentLog) {
    let sent = transport.sent.clone();
    let gateway = Gateway::new(ClientConfig::default(), Arc::new(session), Arc::new(transport));
    (gateway, sent)
}
