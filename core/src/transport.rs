//! Blocking `Transport` backed by ureq.

use ureq::{Agent, RequestBuilder};

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Executes requests with a ureq `Agent`.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data
/// and are classified by the client. Connection-level failures are reported
/// as `TransportError` without a response; a body that cannot be read after
/// the status line arrived is reported with the partial response attached.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => prepare(self.agent.get(url), request).call(),
            HttpMethod::Delete => match request.body {
                Some(_) => send(prepare(self.agent.delete(url), request).force_send_body(), request),
                None => prepare(self.agent.delete(url), request).call(),
            },
            HttpMethod::Post => send(prepare(self.agent.post(url), request), request),
            HttpMethod::Put => send(prepare(self.agent.put(url), request), request),
            HttpMethod::Patch => send(prepare(self.agent.patch(url), request), request),
        };
        let mut response = result.map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Status and headers already arrived; a failed body read still
        // reports them so the real status and rate limits are kept.
        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            Err(e) => {
                return Err(TransportError::with_response(
                    e.to_string(),
                    HttpResponse {
                        status: status.as_u16(),
                        reason,
                        headers,
                        body: String::new(),
                    },
                ))
            }
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}

/// Attach headers and query pairs. Empty header values are omitted.
fn prepare<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        if !value.is_empty() {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }
    if let Some(query) = &request.query {
        for (key, value) in query {
            builder = builder.query(key, value);
        }
    }
    builder
}

fn send(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
