use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};
use vtlist_model::{FollowTarget, ListenerId};

use super::extract::BoundJson;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

pub async fn list_follows(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
) -> AppResult<Json<Value>> {
    let follows = state.follows.follows_of(listener).await?;
    Ok(Json(json!({ "follows": follows })))
}

/// Body is `{"vtuber": id}` or `{"listener": id}`.
pub async fn follow(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(target): BoundJson<FollowTarget>,
) -> AppResult<Json<Value>> {
    let follow = state.follows.follow(listener, target).await?;
    Ok(Json(json!({ "message": "Successfully followed", "data": follow })))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(target): BoundJson<FollowTarget>,
) -> AppResult<Json<Value>> {
    state.follows.unfollow(listener, target).await?;
    Ok(Json(json!({ "message": "Successfully unfollowed" })))
}
