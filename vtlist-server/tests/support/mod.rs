use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result, anyhow};
use argon2::ParamsBuilder;
use axum::Router;
use axum_test::TestServer;
use sqlx::PgPool;
use vtlist_core::{
    application::AppUnitOfWork, database::PostgresDatabase,
    domain::credentials::PasswordCrypto,
};
use vtlist_model::ListenerId;
use vtlist_server::{
    AppState,
    infra::config::{
        AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    },
    routes::create_api_router,
};

#[derive(Debug)]
pub struct TestApp {
    pub router: Router<AppState>,
    pub state: AppState,
}

impl TestApp {
    pub fn into_server(self) -> Result<TestServer> {
        let router: Router<()> = self.router.with_state(self.state);
        let make_service = router.into_make_service_with_connect_info::<SocketAddr>();
        TestServer::builder()
            .http_transport()
            .build(make_service)
            .map_err(|err| anyhow!(err.to_string()))
    }
}

pub async fn build_test_app(pool: PgPool) -> Result<TestApp> {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            primary_url: Some("postgres://test".into()),
            max_connections: 5,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        dev_mode: true,
        auth: AuthConfig {
            token_secret: "integration-test-token-secret".into(),
            token_ttl_secs: 3600,
            password_pepper: "integration-test-pepper".into(),
        },
        metadata: ConfigMetadata::default(),
    };

    let db = PostgresDatabase::from_pool(pool);
    let unit_of_work = Arc::new(
        AppUnitOfWork::from_postgres(&db)
            .map_err(|err| anyhow!("failed to build unit of work: {err}"))?,
    );

    // Default argon2 memory cost makes every sign-up noticeably slow.
    let params = ParamsBuilder::new()
        .m_cost(1024)
        .t_cost(1)
        .p_cost(1)
        .build()
        .map_err(|err| anyhow!(err.to_string()))?;
    let crypto = Arc::new(
        PasswordCrypto::with_params(&config.auth.password_pepper, params)
            .context("failed to build password crypto")?,
    );

    let state = AppState::new(unit_of_work, crypto, Arc::new(config));
    let router = create_api_router(state.clone());

    Ok(TestApp { router, state })
}

/// Bearer header value for a listener from the fixture set.
pub fn bearer(state: &AppState, listener: i32) -> Result<String> {
    let token = state
        .jwt
        .issue(ListenerId(listener))
        .map_err(|err| anyhow!(err.to_string()))?;
    Ok(format!("Bearer {token}"))
}
