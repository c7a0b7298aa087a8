//! Host-gate middleware.
//!
//! Sits in front of the inner handler and rejects any request whose
//! declared host is not covered by the allow-list. Accepted requests are
//! forwarded unmodified; the inner handler's response (or error) passes
//! through untouched.
//!
//! # Design Decisions
//! - Two candidates are checked: the `Host` header value (port stripped)
//!   and the deployment-configured server name. Both must pass
//! - Rejections carry a fixed 403 page with no detail about the configured
//!   patterns or which candidate failed; the candidate is only logged

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gate::HostGate;

/// Fixed body returned for every rejected request.
pub const FORBIDDEN_BODY: &str = "<h1>403 Forbidden</h1>";

/// State required by the host-gate middleware.
#[derive(Clone)]
pub struct HostGateState {
    /// The shared allow-list.
    pub gate: Arc<HostGate>,
    /// Deployment-configured server name, the `SERVER_NAME` equivalent.
    /// Checked alongside the `Host` header; when absent the check fails.
    pub server_name: Option<String>,
}

/// Middleware function enforcing the host allow-list.
///
/// Apply with `axum::middleware::from_fn_with_state`.
pub async fn host_gate_middleware(
    State(state): State<HostGateState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // A Host header that is absent or not valid UTF-8 is an absent
    // candidate and fails the check.
    let host_header = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(strip_port);

    if !state.gate.check(host_header, state.server_name.as_deref()) {
        tracing::warn!(host = ?host_header, "request host not allowed");
        return forbidden_response();
    }

    next.run(request).await
}

/// The fixed 403 response: `text/html` with a one-line body.
pub fn forbidden_response() -> Response {
    Response::builder()
        .status(StatusCode::FORBIDDEN)
        .header(header::CONTENT_TYPE, "text/html")
        .body(Body::from(FORBIDDEN_BODY))
        .expect("static response must build")
}

/// Truncate a Host header value at the first `:`, dropping any port.
fn strip_port(host: &str) -> &str {
    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port(":8080"), "");
        assert_eq!(strip_port("example.com:80:90"), "example.com");
    }

    #[tokio::test]
    async fn test_forbidden_response_triple() {
        let response = forbidden_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], FORBIDDEN_BODY.as_bytes());
    }
}
