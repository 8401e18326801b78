//! HTTP middleware.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gateway_core::GatewayError;
use std::any::Any;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::extractors::REQUEST_ID_HEADER;

/// Ensure every request carries an `x-request-id` and echo it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let existing = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty())
        .cloned();

    let id = match existing {
        Some(value) => value,
        None => match HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()) {
            Ok(value) => value,
            Err(_) => return next.run(request).await,
        },
    };

    request.headers_mut().insert(REQUEST_ID_HEADER, id.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, id);
    response
}

/// Log method, path, status and latency of every request
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(%method, %path, status, latency_ms, request_id = %request_id, "Request completed");
    } else if response.status().is_client_error() {
        warn!(%method, %path, status, latency_ms, request_id = %request_id, "Request completed");
    } else {
        info!(%method, %path, status, latency_ms, request_id = %request_id, "Request completed");
    }

    response
}

/// CORS policy: any origin, method and header, credentials allowed
pub fn cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Render a caught handler panic as an internal error
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    ApiError::from(GatewayError::internal(format!("handler panicked: {detail}"))).into_response()
}
