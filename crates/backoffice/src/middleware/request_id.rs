//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an upstream `x-request-id` header when present, otherwise generates
//! a UUID v4. The id is recorded on the current span, tagged on the Sentry
//! scope and echoed in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id that is reused as-is.
const MAX_UPSTREAM_LEN: usize = 128;

/// The request's correlation id, available to handlers as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_UPSTREAM_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Extension, Router, body::Body, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(RequestId(id)): Extension<RequestId>| async move { id }),
            )
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    async fn send(request: axum::http::Request<Body>) -> (String, String) {
        let response = app().oneshot(request).await.unwrap();
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (header, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_generates_uuid_when_absent() {
        let request = axum::http::Request::get("/").body(Body::empty()).unwrap();
        let (header, seen) = send(request).await;
        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(header, seen);
    }

    #[tokio::test]
    async fn test_reuses_upstream_id() {
        let request = axum::http::Request::get("/")
            .header(REQUEST_ID_HEADER, "caixa-01")
            .body(Body::empty())
            .unwrap();
        let (header, seen) = send(request).await;
        assert_eq!(header, "caixa-01");
        assert_eq!(seen, "caixa-01");
    }

    #[tokio::test]
    async fn test_replaces_oversized_upstream_id() {
        let request = axum::http::Request::get("/")
            .header(REQUEST_ID_HEADER, "x".repeat(MAX_UPSTREAM_LEN + 1))
            .body(Body::empty())
            .unwrap();
        let (header, _) = send(request).await;
        assert!(Uuid::parse_str(&header).is_ok());
    }
}
