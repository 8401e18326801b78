//! HTTP request handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use gateway_core::{GenerateRequest, GenerateResponse, ProviderKind};
use gateway_telemetry::RequestOutcome;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info, instrument};

use crate::{
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: &'static str,
    /// Gateway version
    pub version: &'static str,
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Whether every provider can be served
    pub ready: bool,
    /// Credential availability per provider
    pub providers: BTreeMap<&'static str, bool>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let credentials = state.dispatcher.credentials();
    let providers: BTreeMap<&'static str, bool> = ProviderKind::ALL
        .iter()
        .map(|p| (p.as_str(), credentials.lookup(*p).is_ok()))
        .collect();
    let ready = credentials.is_complete();

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse { ready, providers }))
}

/// Liveness check endpoint
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Prometheus metrics endpoint
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_text() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.metrics.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            ApiError::internal().into_response()
        }
    }
}

/// Generate text with the requested model
#[instrument(skip(state, body), fields(request_id = %request_id))]
pub async fn generate(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(body): JsonBody<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let model = body.model;

    info!(
        model = %model,
        temperature = body.temperature,
        top_p = body.top_p,
        "Generation request received"
    );

    let outcome = match body.validate() {
        Ok(request) => state.dispatcher.generate(&request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            state
                .metrics
                .record_request(model.as_str(), RequestOutcome::Success);
            info!(model = %model, "Generation succeeded");
            Ok(Json(GenerateResponse::from(result)))
        }
        Err(e) => {
            state
                .metrics
                .record_request(model.as_str(), RequestOutcome::Error);
            state.metrics.record_error(e.kind().as_str());
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[test]
    fn test_readiness_response_serialization() {
        let response = ReadinessResponse {
            ready: false,
            providers: BTreeMap::from([("gemini", true), ("openai", false)]),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["providers"]["gemini"], true);
    }
}
