use axum::{
    Json,
    extract::State,
    http::{HeaderName, HeaderValue, header},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use vtlist_model::{Listener, ListenerId};

use super::middleware::AUTH_COOKIE;
use crate::errors::{AppError, AppResult};
use crate::handlers::extract::BoundJson;
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub listener_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub listener_id: ListenerId,
    pub listener_name: String,
    pub expires_in: i64,
}

pub async fn sign_up(
    State(state): State<AppState>,
    BoundJson(request): BoundJson<CredentialsRequest>,
) -> AppResult<SessionResponse> {
    let listener = state
        .listeners
        .sign_up(&request.listener_name, &request.password)
        .await?;
    info!(listener_id = %listener.listener_id, "listener signed up");
    session_response(&state, listener)
}

pub async fn log_in(
    State(state): State<AppState>,
    BoundJson(request): BoundJson<CredentialsRequest>,
) -> AppResult<SessionResponse> {
    let listener = state
        .listeners
        .log_in(&request.listener_name, &request.password)
        .await?;
    info!(listener_id = %listener.listener_id, "listener logged in");
    session_response(&state, listener)
}

/// Clears the session cookie. Bearer tokens stay valid until they expire.
pub async fn log_out(
    State(state): State<AppState>,
) -> AppResult<(AppendHeaders<[(HeaderName, HeaderValue); 1]>, Json<serde_json::Value>)> {
    let cookie = cookie_header(&session_cookie("", 0, secure_cookies(&state)))?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(serde_json::json!({ "message": "Successfully logged out" })),
    ))
}

type SessionResponse = (
    AppendHeaders<[(HeaderName, HeaderValue); 1]>,
    Json<AuthToken>,
);

fn session_response(
    state: &AppState,
    listener: Listener,
) -> AppResult<SessionResponse> {
    let token = state.jwt.issue(listener.listener_id).map_err(|err| {
        error!(error = %err, "failed to sign token");
        AppError::internal("Failed to generate access token")
    })?;

    let cookie = cookie_header(&session_cookie(
        &token,
        state.jwt.ttl_secs(),
        secure_cookies(state),
    ))?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthToken {
            token,
            listener_id: listener.listener_id,
            listener_name: listener.listener_name,
            expires_in: state.jwt.ttl_secs(),
        }),
    ))
}

// Dev servers are usually reached over plain http.
fn secure_cookies(state: &AppState) -> bool {
    !state.config().dev_mode
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn cookie_header(cookie: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(cookie)
        .map_err(|_| AppError::internal("Failed to build session cookie"))
}
