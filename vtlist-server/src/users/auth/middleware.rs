use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use vtlist_model::ListenerId;

use crate::errors::AppError;
use crate::infra::app_state::AppState;

pub const AUTH_COOKIE: &str = "auth-token";

/// Rejects the request unless it carries a valid token for an existing
/// listener; on success the [`ListenerId`] is available as an extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let listener = authenticate(&state, request.headers()).await?;
    request.extensions_mut().insert(listener);
    Ok(next.run(request).await)
}

/// Like [`auth_middleware`] but lets anonymous requests through without the
/// extension.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Ok(listener) = authenticate(&state, request.headers()).await {
        request.extensions_mut().insert(listener);
    }

    next.run(request).await
}

async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<ListenerId, AppError> {
    let token = extract_token(headers).ok_or_else(AppError::identity)?;

    let claims = state.jwt.validate(&token).map_err(|err| {
        debug!(error = %err, "token rejected");
        AppError::identity()
    })?;

    match state
        .unit_of_work
        .listeners
        .find_by_id(claims.listener_id)
        .await
    {
        Ok(Some(listener)) => Ok(listener.listener_id),
        Ok(None) => {
            warn!(listener_id = %claims.listener_id, "token for unknown listener");
            Err(AppError::identity())
        }
        Err(err) => {
            warn!(error = %err, "listener lookup failed");
            Err(AppError::identity())
        }
    }
}

/// Bearer header first, then the session cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_bearer_token(headers).or_else(|| extract_cookie_token(headers))
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}
