use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;
use vtlist_core::error::CatalogError;

pub type AppResult<T> = Result<T, AppError>;

pub const IDENTITY_FAILURE: &str = "Error fetching listener info";
pub const BINDING_FAILURE: &str = "Invalid request body";
pub const OWNERSHIP_FAILURE: &str = "Only the inputter can modify each data";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn identity() -> Self {
        Self::bad_request(IDENTITY_FAILURE)
    }

    pub fn binding() -> Self {
        Self::bad_request(BINDING_FAILURE)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

// Write paths fail closed with a client error whatever went wrong; storage
// details stay in the log.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Forbidden(_) => Self::bad_request(OWNERSHIP_FAILURE),
            CatalogError::InvalidCredentials => {
                Self::bad_request("Invalid listener name or password")
            }
            CatalogError::NotFound(_)
            | CatalogError::Conflict(_)
            | CatalogError::InvalidInput(_) => Self::bad_request(err.to_string()),
            CatalogError::Database(_)
            | CatalogError::Migration(_)
            | CatalogError::Crypto(_) => {
                error!(error = %err, "request failed in storage");
                Self::bad_request("The request could not be completed")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(err).into()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}
