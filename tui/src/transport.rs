//! ureq-backed executor for `HttpRequest` values.

use todo_client::{HttpMethod, HttpRequest, HttpResponse};

/// An agent with status-as-error disabled, so 4xx/5xx responses come back
/// as data for the client to interpret; only transport-level failures are
/// `Err`.
pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Execute one request and return the response as plain data.
pub fn execute(agent: &ureq::Agent, req: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let mut response = match (&req.method, &req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call()?,
        (HttpMethod::Delete, _) => agent.delete(&req.path).call()?,
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes())?,
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty()?,
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes())?,
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty()?,
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
