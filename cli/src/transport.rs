//! Blocking HTTP transport built on ureq.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::trace;

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Every request, including reading the body, must finish within
    /// `timeout`.
    pub fn new(timeout: Duration) -> Self {
        // 4xx/5xx come back as responses so the core can interpret them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        trace!(method = %req.method, path = %req.path, "executing");
        let headers = req.headers;
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.path), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&req.path), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.path), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&req.path), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.path), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&req.path), &headers).send_empty(),
        };
        let mut response = result.map_err(map_error)?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(map_error)?;
        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        other => ApiError::Network(other.to_string()),
    }
}
