use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AppError;

/// `Json<T>` whose rejection is the uniform "Invalid request body" error
/// instead of axum's plain-text 4xx.
#[derive(Debug, Clone)]
pub struct BoundJson<T>(pub T);

impl<T, S> FromRequest<S> for BoundJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "request body rejected");
                Err(AppError::binding())
            }
        }
    }
}
