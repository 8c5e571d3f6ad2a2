//! HTTP Middleware
//!
//! 按状态码记录请求日志：4xx 记 warn，5xx 记 error
//! 业务错误的详细原因在 ApiError::into_response() 中记录

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(method = %method, path = %path, elapsed_ms, "HTTP request completed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::error::ApiError;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn bad_request() -> ApiError {
        ApiError::BadRequest("missing".to_string())
    }

    async fn internal() -> ApiError {
        ApiError::Internal("boom".to_string())
    }

    fn router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/bad", get(bad_request))
            .route("/internal", get(internal))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_passes_responses_through() {
        assert_eq!(status_of("/ok").await, StatusCode::OK);
        assert_eq!(status_of("/bad").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/internal").await, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
