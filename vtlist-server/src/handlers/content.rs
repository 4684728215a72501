//! Create, edit and delete for listener-entered records. One generic set of
//! handlers serves VTubers, movies and karaokes.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use vtlist_core::application::ContentInteractor;
use vtlist_model::{
    ContentRecord, Karaoke, KaraokeId, ListenerId, Movie, Vtuber, VtuberId,
};

use super::extract::BoundJson;
use crate::errors::AppResult;
use crate::infra::app_state::AppState;

/// A record kind served over HTTP.
pub trait ContentRoute: ContentRecord + Serialize + DeserializeOwned {
    /// Body accepted by the delete endpoint.
    type KeyBody: DeserializeOwned + Send + 'static;

    fn interactor(state: &AppState) -> &ContentInteractor<Self>;

    fn key_of(body: Self::KeyBody) -> Self::Key;
}

#[derive(Debug, Deserialize)]
pub struct VtuberKey {
    pub vtuber_id: VtuberId,
}

#[derive(Debug, Deserialize)]
pub struct MovieKey {
    pub movie_url: String,
}

#[derive(Debug, Deserialize)]
pub struct KaraokeKey {
    pub karaoke_id: KaraokeId,
}

impl ContentRoute for Vtuber {
    type KeyBody = VtuberKey;

    fn interactor(state: &AppState) -> &ContentInteractor<Self> {
        &state.vtubers
    }

    fn key_of(body: VtuberKey) -> VtuberId {
        body.vtuber_id
    }
}

impl ContentRoute for Movie {
    type KeyBody = MovieKey;

    fn interactor(state: &AppState) -> &ContentInteractor<Self> {
        &state.movies
    }

    fn key_of(body: MovieKey) -> String {
        body.movie_url
    }
}

impl ContentRoute for Karaoke {
    type KeyBody = KaraokeKey;

    fn interactor(state: &AppState) -> &ContentInteractor<Self> {
        &state.karaokes
    }

    fn key_of(body: KaraokeKey) -> KaraokeId {
        body.karaoke_id
    }
}

/// The inputter is always the authenticated listener, whatever the body says.
pub async fn create_content<E: ContentRoute>(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(record): BoundJson<E>,
) -> AppResult<Json<Value>> {
    let created = E::interactor(&state).create(listener, record).await?;
    Ok(Json(json!({
        "message": format!("Successfully registered the new {}", E::KIND),
        "data": created,
    })))
}

pub async fn update_content<E: ContentRoute>(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(record): BoundJson<E>,
) -> AppResult<Json<Value>> {
    E::interactor(&state).update(listener, record).await?;
    Ok(Json(json!({ "message": "Successfully updated" })))
}

pub async fn delete_content<E: ContentRoute>(
    State(state): State<AppState>,
    Extension(listener): Extension<ListenerId>,
    BoundJson(body): BoundJson<E::KeyBody>,
) -> AppResult<Json<Value>> {
    let key = E::key_of(body);
    E::interactor(&state).delete(listener, &key).await?;
    Ok(Json(json!({ "message": "Successfully deleted" })))
}
