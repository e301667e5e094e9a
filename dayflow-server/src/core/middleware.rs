//! Request logging middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http::HeaderValue;
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Route template for matched requests (`/api/employees/{id}`), raw path otherwise
///
/// [`MatchedPath`] is only set for middleware added with `Router::layer`.
pub(crate) fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// Access log for every request
///
/// Reuses the caller's `x-request-id` or generates one, echoes it on the
/// response and logs method, matched path, status and latency to the
/// `http_access` target.
pub async fn log_request(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = route_label(&req);

    let mut response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::warn!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request failed"
        );
    } else {
        tracing::info!(
            target: "http_access",
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    async fn echo_label(req: Request, next: Next) -> Response {
        let label = route_label(&req);
        let mut response = next.run(req).await;
        response
            .headers_mut()
            .insert("x-route", HeaderValue::from_str(&label).unwrap());
        response
    }

    async fn send(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn route_label_uses_template_inside_router() {
        let app = Router::new()
            .route("/items/{id}", get(|| async { "ok" }))
            .layer(middleware::from_fn(echo_label));

        let res = send(app, "/items/42").await;
        assert_eq!(res.headers()["x-route"], "/items/{id}");
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let app = Router::new()
            .route("/items/{id}", get(|| async { "ok" }))
            .layer(middleware::from_fn(log_request));

        let req = Request::builder()
            .uri("/items/1")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.headers()[REQUEST_ID_HEADER], "abc-123");

        let res = send(app, "/items/1").await;
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    }
}
