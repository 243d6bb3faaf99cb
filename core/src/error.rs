//! Error types for the Ola API client.
//!
//! # Design
//! Failures that happen before any network I/O (missing credentials, a
//! production client asked to do sandbox work, an unknown verb) get their own
//! variants so callers can tell them apart from `ApiError`, which only exists
//! once a round-trip has been attempted and carries the HTTP status.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No access token is configured; raised before any request is sent.
    #[error("Provide access token")]
    MissingCredential,

    /// A sandbox-only operation was attempted with a production client.
    #[error("{0}")]
    SandboxRequired(String),

    /// The verb is not one of GET, POST, PUT, PATCH or DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A recognized configuration key held a value of the wrong type.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// Request parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A successful response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request reached the transport and failed; carries status and cause.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An HTTP-level or transport-level failure.
///
/// When no HTTP status could be obtained (connection refused, timeout, TLS
/// failure) `status_code` is the sentinel `500` and `reason_phrase` is the
/// transport's error message.
#[derive(Debug, Error)]
#[error("{reason_phrase} ({status_code})")]
pub struct ApiError {
    pub reason_phrase: String,
    pub status_code: u16,
    /// Raw response body, when a response was received.
    pub body: Option<String>,
    #[source]
    pub source: Option<TransportError>,
}

/// Status reported when the transport failed without producing a response.
pub const NO_RESPONSE_STATUS: u16 = 500;

pub type Result<T> = std::result::Result<T, ClientError>;
