//! Route definitions for the gateway API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{handlers, middleware, state::AppState};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check))
        // Metrics endpoint
        .route("/metrics", get(handlers::metrics_endpoint))
        // Generation API
        .nest("/api", api_routes())
        // Apply middleware, innermost first
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::cors_layer())
        // Add state
        .with_state(state)
}

/// Generation routes
fn api_routes() -> Router<AppState> {
    Router::new().route("/generate", post(handlers::generate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use gateway_config::{CredentialStore, GatewayConfig};
    use gateway_core::ProviderKind;
    use gateway_providers::ReqwestTransport;
    use gateway_routing::Dispatcher;
    use gateway_telemetry::Metrics;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn create_test_state(credentials: CredentialStore) -> AppState {
        let config = GatewayConfig::default();
        let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(1)).unwrap());
        let dispatcher = Dispatcher::new(&config.upstream, Arc::new(credentials), transport);
        AppState::new(dispatcher, Arc::new(Metrics::new().unwrap()))
    }

    fn full_credentials() -> CredentialStore {
        CredentialStore::from_entries([
            (ProviderKind::Gemini, "g"),
            (ProviderKind::OpenAI, "o"),
            (ProviderKind::DeepSeek, "d"),
        ])
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state(full_credentials()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = create_router(create_test_state(full_credentials()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_requires_all_credentials() {
        let app = create_router(create_test_state(CredentialStore::from_entries([(
            ProviderKind::Gemini,
            "g",
        )])));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generate_rejects_get() {
        let app = create_router(create_test_state(full_credentials()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
