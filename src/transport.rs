use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Error produced by a transport implementation. Propagated to callers
/// unchanged inside [`IaphubError::Transport`](crate::errors::IaphubError).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP verb of an exchange. Only the verbs the IAPHUB API uses are
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully-composed outgoing request: target URL with its encoded query
/// string, the standard headers, and an optional JSON payload.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of the named header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw result of an exchange. The body is read in full before the response
/// is handed back, so status classification always has it available.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Pluggable transport capable of performing one generic HTTP exchange.
///
/// The client depends only on this seam, never on a concrete network stack;
/// anything able to execute a request can be plugged in, including in-memory
/// fakes in tests. Implementations own their cancellation and timeout policy.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Default transport backed by a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport enforcing `timeout` on every outgoing call, from
    /// connect to the last body byte.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
