//! Blocking `ureq` implementation of the core `Transport`.

use task_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::trace;
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

/// Executes requests with a shared `ureq::Agent`.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// come back as data and the core parser decides what they mean. Only
/// connection-level failures become `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let headers = &req.headers;
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&req.path), headers), req.body.as_deref()),
            HttpMethod::Put => send(with_headers(self.agent.put(&req.path), headers), req.body.as_deref()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
