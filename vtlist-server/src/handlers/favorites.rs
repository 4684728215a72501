use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use vtlist_model::{FavoriteKey, ListenerId};

use super::extract::BoundJson;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct MovieFavoriteRequest {
    pub movie_url: String,
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
) -> AppResult<Json<Value>> {
    let favorites = state.favorites.find_favs_of_user(listener).await?;
    Ok(Json(json!({ "favorites": favorites })))
}

pub async fn favorite_movie(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(request): BoundJson<MovieFavoriteRequest>,
) -> AppResult<Json<Value>> {
    let count = state
        .favorites
        .favorite_movie(listener, &request.movie_url)
        .await?;
    Ok(Json(json!({ "message": "Successfully favorited", "data": count })))
}

pub async fn unfavorite_movie(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(request): BoundJson<MovieFavoriteRequest>,
) -> AppResult<Json<Value>> {
    let count = state
        .favorites
        .unfavorite_movie(listener, &request.movie_url)
        .await?;
    Ok(Json(json!({ "message": "Successfully unfavorited", "data": count })))
}

pub async fn favorite_karaoke(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(key): BoundJson<FavoriteKey>,
) -> AppResult<Json<Value>> {
    let count = state.favorites.favorite_karaoke(listener, &key).await?;
    Ok(Json(json!({ "message": "Successfully favorited", "data": count })))
}

pub async fn unfavorite_karaoke(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(key): BoundJson<FavoriteKey>,
) -> AppResult<Json<Value>> {
    let count = state.favorites.unfavorite_karaoke(listener, &key).await?;
    Ok(Json(json!({ "message": "Successfully unfavorited", "data": count })))
}
