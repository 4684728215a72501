pub mod v1;

use crate::AppState;
use axum::Router;
use vtlist_core::api_routes::v1::PREFIX;

/// Create the main API router with all versions
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new().nest(PREFIX, v1::create_v1_router(state))
}
