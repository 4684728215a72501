use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};
use tracing::error;
use vtlist_core::domain::Partial;
use vtlist_model::ListenerId;

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

pub const NOT_LOGGED_IN: &str = "dont you Loged in ?";

/// Landing page. Always 200: failed reads come back as entries in `error`,
/// and anonymous callers get plain counts plus a log-in hint.
pub async fn top_page(
    State(state): State<AppState>,
    requester: Option<Extension<ListenerId>>,
) -> Json<Value> {
    let requester = requester.map(|Extension(listener)| listener);
    let Partial { data, warnings } = state.favorites.top_page(requester).await;

    let mut body = json!({
        "vtubers": data.vtubers,
        "vtubers_movies": data.vtubers_movies,
        "vtubers_movies_karaokes": data.vtubers_movies_karaokes,
        "error": warnings,
    });
    if requester.is_none() {
        body["message"] = json!(NOT_LOGGED_IN);
    }
    Json(body)
}

pub async fn contents(State(state): State<AppState>) -> Json<Value> {
    let Partial { data, warnings } = state.catalog.contents().await;
    Json(json!({
        "vtubers": data.vtubers,
        "movies": data.movies,
        "karaokes": data.karaokes,
        "error": warnings,
    }))
}

pub async fn vtubers_movies(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let rows = state.catalog.get_all_vtubers_movies().await.map_err(|err| {
        error!(error = %err, "vtuber/movie join failed");
        AppError::internal("Failed to load vtubers and movies")
    })?;
    Ok(Json(json!({ "vtubers_and_movies": rows })))
}

/// All-or-nothing three-way join; any failure is a 500.
pub async fn essential_join(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let rows = state.catalog.get_essential_join().await.map_err(|err| {
        error!(error = %err, "essential join failed");
        AppError::internal("Failed to load vtubers, movies and karaokes")
    })?;
    Ok(Json(json!({ "vtubers_and_movies_and_karaokes": rows })))
}
