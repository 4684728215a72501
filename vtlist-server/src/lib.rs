//! # vtlist server
//!
//! HTTP front end for the vtlist catalogue. Listeners sign up, register
//! VTubers, movies and karaoke performances, favorite them and follow each
//! other; the landing page aggregates everything with live favorite counts.
//!
//! Built on axum. Persistence and business rules live in `vtlist-core`; this
//! crate owns configuration, identity extraction and response shaping.

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;
pub mod users;

pub use infra::app_state::AppState;

pub fn create_app(state: AppState) -> Router {
    let versioned_api = routes::create_api_router(state.clone());

    Router::new()
        .route("/ping", get(ping_handler))
        .merge(versioned_api)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive in dev, allow-list otherwise.
fn cors_layer(state: &AppState) -> CorsLayer {
    if state.config().dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = state
        .config()
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use argon2::ParamsBuilder;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use vtlist_core::{
        application::AppUnitOfWork, database::PostgresDatabase,
        domain::credentials::PasswordCrypto,
    };

    use super::*;
    use crate::infra::config::{
        AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    };

    fn state(dev_mode: bool) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseConfig {
                primary_url: Some("postgres://unused".into()),
                max_connections: 1,
            },
            cors: CorsConfig {
                allowed_origins: vec!["https://vtlist.example".into()],
            },
            dev_mode,
            auth: AuthConfig {
                token_secret: "router-test-secret-router-test-secret".into(),
                token_ttl_secs: 60,
                password_pepper: "router-test-pepper".into(),
            },
            metadata: ConfigMetadata::default(),
        };

        // Nothing listens on port 1: every repository call fails fast.
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy("postgres://unused@127.0.0.1:1/unused")
            .unwrap();
        let db = PostgresDatabase::from_pool(pool);
        let unit_of_work = Arc::new(AppUnitOfWork::from_postgres(&db).unwrap());
        let params = ParamsBuilder::new().m_cost(1024).t_cost(1).p_cost(1).build().unwrap();
        let crypto = Arc::new(PasswordCrypto::with_params("pepper", params).unwrap());

        AppState::new(unit_of_work, crypto, Arc::new(config))
    }

    #[tokio::test]
    async fn ping_reports_version() {
        let response = create_app(state(true))
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn cors_allows_only_listed_origins_outside_dev() {
        let app = create_app(state(false));

        let allowed = app
            .clone()
            .oneshot(
                Request::get("/ping")
                    .header(header::ORIGIN, "https://vtlist.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://vtlist.example"))
        );

        let other = app
            .oneshot(
                Request::get("/ping")
                    .header(header::ORIGIN, "https://elsewhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            other
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn protected_route_without_token_is_rejected_before_storage() {
        let response = create_app(state(true))
            .oneshot(
                Request::get("/api/v1/favorites")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    async fn get_json(path: &str) -> (StatusCode, Value) {
        let response = create_app(state(true))
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn join_reads_fail_with_500_when_storage_is_down() {
        for path in ["/api/v1/vtubers-movies-karaokes", "/api/v1/vtubers-movies"] {
            let (status, body) = get_json(path).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
            assert!(body["error"]["message"].is_string(), "{path}: {body}");
        }
    }

    #[tokio::test]
    async fn top_page_reports_storage_failures_with_200() {
        let (status, body) = get_json("/api/v1/toppage").await;

        assert_eq!(status, StatusCode::OK);
        let errors = body["error"].as_array().unwrap();
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| e["message"].is_string()));
        for collection in ["vtubers", "vtubers_movies", "vtubers_movies_karaokes"] {
            assert_eq!(body[collection], serde_json::json!([]), "{collection}");
        }
        assert_eq!(body["message"], handlers::catalog::NOT_LOGGED_IN);
    }

    #[tokio::test]
    async fn contents_reports_storage_failures_with_200() {
        let (status, body) = get_json("/api/v1/contents").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["movies"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn logout_cookie_is_secure_outside_dev() {
        for (dev_mode, secure) in [(true, false), (false, true)] {
            let response = create_app(state(dev_mode))
                .oneshot(Request::post("/api/v1/logout").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
            assert!(cookie.contains("Max-Age=0"));
            assert_eq!(cookie.contains("; Secure"), secure, "dev_mode={dev_mode}");
        }
    }
}
