use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by IAPHUB operations.
///
/// Every failure is returned once to the immediate caller; nothing is
/// retried, logged-and-swallowed, or mapped away internally.
#[derive(Debug, Error)]
pub enum IaphubError {
    /// Client construction input was invalid (empty API key or app id,
    /// unusable default transport).
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// A required operation input was empty or absent. Raised before any
    /// network call; the payload lists the missing parameter names.
    #[error("missing required parameter(s): {0}")]
    MissingParameter(String),

    /// Android receipt submissions additionally require a SKU and a
    /// proration mode.
    #[error("missing required parameter(s) for the android platform: {0}")]
    MissingAndroidParameter(String),

    /// The underlying transport failed to complete the exchange (DNS,
    /// connection, timeout). The transport's own error is kept as source.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The service answered with a non-200 status code. The raw body text is
    /// kept verbatim; together with the status it is the whole diagnostic
    /// channel the service offers.
    #[error("{status}: {body}")]
    Remote { status: u16, body: String },

    /// The response body was not valid JSON or did not match the expected
    /// shape.
    #[error("failed to decode response: {0}")]
    Deserialization(#[from] serde_json::Error),
}
