//! The Ola API client: request building, dispatch and response handling.
//!
//! # Design
//! `Client` owns an immutable `ClientConfig`, the most recent rate-limit
//! snapshot and a boxed `Transport`. Each call is split the same way the
//! wire is: `build_request` produces an `HttpRequest` without touching the
//! network, the transport executes it, and `handle_response` classifies the
//! outcome. Callers that do their own I/O can use the two halves directly.

use std::fmt;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::auth;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Parameters, Transport, TransportError};
use crate::rate_limit::RateLimitSnapshot;
use crate::response;

pub const DOMAIN: &str = "olacabs.com";
pub const SANDBOX_HOST: &str = "sandbox-t1";
pub const PRODUCTION_HOST: &str = "devapi";

const RIDE_REQUEST_PATH: &str = "bookings/create";
const SANDBOX_REQUIRED_MESSAGE: &str =
    "Attempted to invoke sandbox functionality with production client; this is not recommended";

pub struct Client {
    config: ClientConfig,
    rate_limit: RwLock<Option<RateLimitSnapshot>>,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("rate_limit", &*self.rate_limit.read())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client that talks to the API over ureq.
    #[cfg(feature = "ureq")]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, crate::transport::UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            rate_limit: RwLock::new(None),
            transport: Box::new(transport),
        }
    }

    /// Replace the transport used for subsequent calls.
    pub fn set_transport(&mut self, transport: impl Transport + 'static) -> &mut Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The most recently captured rate-limit snapshot.
    pub fn rate_limit(&self) -> Option<RateLimitSnapshot> {
        *self.rate_limit.read()
    }

    /// Absolute URL for an API path, e.g. `https://devapi.olacabs.com/v1/products`.
    pub fn url_for_path(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        let host = if self.config.use_sandbox {
            SANDBOX_HOST
        } else {
            PRODUCTION_HOST
        };
        if self.config.api_version.is_empty() {
            format!("https://{host}.{DOMAIN}/{path}")
        } else {
            format!("https://{host}.{DOMAIN}/{}/{path}", self.config.api_version)
        }
    }

    /// Headers attached to every request. Fails when no access token is set.
    pub fn headers(&self) -> Result<Vec<(String, String)>> {
        auth::headers(&self.config)
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        parameters: &Parameters,
    ) -> Result<HttpRequest> {
        let headers = self.headers()?;
        let url = self.url_for_path(path);

        let (query, body) = if parameters.is_empty() {
            (None, None)
        } else if method == HttpMethod::Get {
            (Some(query_pairs(parameters)), None)
        } else {
            let body = serde_json::to_string(parameters).map_err(ClientError::Serialization)?;
            (None, Some(body))
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            query,
            body,
        })
    }

    /// Record rate-limit metadata from whatever response was received, then
    /// classify the outcome.
    pub fn handle_response(
        &self,
        outcome: std::result::Result<HttpResponse, TransportError>,
    ) -> Result<Value> {
        if let Some(received) = response::received(&outcome) {
            self.capture_rate_limit(received);
        }
        response::classify(outcome)
    }

    /// Issue a request with a verb given as text, e.g. `"post"`.
    pub fn request(&self, verb: &str, path: &str, parameters: &Parameters) -> Result<Value> {
        let method: HttpMethod = verb.parse()?;
        self.send(method, path, parameters)
    }

    pub fn send(&self, method: HttpMethod, path: &str, parameters: &Parameters) -> Result<Value> {
        let request = self.build_request(method, path, parameters)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let outcome = self.transport.execute(&request);
        self.handle_response(outcome)
    }

    pub fn get(&self, path: &str, parameters: &Parameters) -> Result<Value> {
        self.send(HttpMethod::Get, path, parameters)
    }

    pub fn post(&self, path: &str, parameters: &Parameters) -> Result<Value> {
        self.send(HttpMethod::Post, path, parameters)
    }

    pub fn put(&self, path: &str, parameters: &Parameters) -> Result<Value> {
        self.send(HttpMethod::Put, path, parameters)
    }

    pub fn patch(&self, path: &str, parameters: &Parameters) -> Result<Value> {
        self.send(HttpMethod::Patch, path, parameters)
    }

    pub fn delete(&self, path: &str, parameters: &Parameters) -> Result<Value> {
        self.send(HttpMethod::Delete, path, parameters)
    }

    /// Book a ride on behalf of the user.
    ///
    /// `attributes` is sent as the JSON body, e.g. `pickup_lat`,
    /// `pickup_lng`, `category`, `pickup_mode`.
    pub fn request_ride(&self, attributes: &Parameters) -> Result<Value> {
        self.post(RIDE_REQUEST_PATH, attributes)
    }

    /// Fail unless the client targets the sandbox. Meant as a guard before
    /// operations that only make sense against ephemeral sandbox data.
    pub fn enforce_sandbox(&self, message: Option<&str>) -> Result<()> {
        if self.config.use_sandbox {
            return Ok(());
        }
        Err(ClientError::SandboxRequired(
            message.unwrap_or(SANDBOX_REQUIRED_MESSAGE).to_string(),
        ))
    }

    fn capture_rate_limit(&self, response: &HttpResponse) {
        if let Some(snapshot) = RateLimitSnapshot::from_response(response) {
            debug!(
                limit = snapshot.limit,
                remaining = snapshot.remaining,
                reset_at = %snapshot.reset_at,
                "captured rate limit"
            );
            *self.rate_limit.write() = Some(snapshot);
        }
    }
}

/// Query pairs for a GET request. Strings are sent verbatim, nulls are
/// skipped and every other value is sent as its JSON text.
fn query_pairs(parameters: &Parameters) -> Vec<(String, String)> {
    parameters
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}
