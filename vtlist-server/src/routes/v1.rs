use axum::{
    Router, middleware,
    routing::{get, post},
};
use vtlist_core::api_routes::v1;
use vtlist_model::{Karaoke, Movie, Vtuber};

use crate::{
    AppState,
    handlers::{
        catalog,
        content::{ContentRoute, create_content, delete_content, update_content},
        favorites, follows,
    },
    users::auth::{self, auth_middleware, optional_auth_middleware},
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoints
        .route(v1::SIGN_UP, post(auth::handlers::sign_up))
        .route(v1::LOG_IN, post(auth::handlers::log_in))
        .route(v1::LOG_OUT, post(auth::handlers::log_out))
        // Public catalogue reads
        .route(v1::CONTENTS, get(catalog::contents))
        .route(v1::VTUBERS_MOVIES, get(catalog::vtubers_movies))
        .route(v1::ESSENTIAL_JOIN, get(catalog::essential_join))
        .merge(create_optional_auth_routes(state.clone()))
        .merge(create_protected_routes(state))
}

/// Routes that personalise their answer when a listener is known
fn create_optional_auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(v1::TOP_PAGE, get(catalog::top_page))
        .layer(middleware::from_fn_with_state(state, optional_auth_middleware))
}

/// Create protected routes that require authentication
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(v1::VTUBER, content_routes::<Vtuber>())
        .route(v1::MOVIE, content_routes::<Movie>())
        .route(v1::KARAOKE, content_routes::<Karaoke>())
        .route(v1::FAVORITES, get(favorites::list_favorites))
        .route(
            v1::FAVORITE_MOVIE,
            post(favorites::favorite_movie).delete(favorites::unfavorite_movie),
        )
        .route(
            v1::FAVORITE_KARAOKE,
            post(favorites::favorite_karaoke).delete(favorites::unfavorite_karaoke),
        )
        .route(
            v1::FOLLOW,
            get(follows::list_follows)
                .post(follows::follow)
                .delete(follows::unfollow),
        )
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn content_routes<E: ContentRoute>() -> axum::routing::MethodRouter<AppState> {
    post(create_content::<E>)
        .put(update_content::<E>)
        .delete(delete_content::<E>)
}
