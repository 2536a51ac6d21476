#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use iaphub::client::{ClientOptions, IaphubClient};
use iaphub::domain::entities::common::Environment;
use iaphub::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub const API_KEY: &str = "api-key-1";
pub const APP_ID: &str = "app-id-1";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport double: hands every request to a closure and records it so
/// tests can assert on the outgoing traffic, or on its absence.
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    handler: Box<Handler>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Replies to every request with the given status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        let body = body.to_owned();
        Self::new(move |_| {
            Ok(HttpResponse {
                status,
                body: body.clone().into_bytes(),
            })
        })
    }

    pub fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

/// Client scoped to the sandbox environment, sending through the given
/// transport.
pub fn sandbox_client(transport: &Arc<MockTransport>) -> IaphubClient<Arc<MockTransport>> {
    IaphubClient::with_transport(
        API_KEY,
        APP_ID,
        Arc::clone(transport),
        ClientOptions::new().environment(Environment::Sandbox),
    )
    .unwrap()
}
