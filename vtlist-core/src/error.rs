use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("Only the inputter can modify this {0}")]
    Forbidden(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential hashing error: {0}")]
    Crypto(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure taxonomy shared by every request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid requester identity.
    Identity,
    /// Malformed or invalid input.
    Binding,
    /// Valid identity, wrong owner.
    Authorization,
    /// Query or write failure.
    Storage,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Database(_)
            | CatalogError::Migration(_)
            | CatalogError::NotFound(_)
            | CatalogError::Conflict(_) => ErrorKind::Storage,
            CatalogError::Forbidden(_) => ErrorKind::Authorization,
            CatalogError::InvalidInput(_) => ErrorKind::Binding,
            CatalogError::InvalidCredentials | CatalogError::Crypto(_) => {
                ErrorKind::Identity
            }
        }
    }

    /// Classify a failed write. Unique and foreign-key violations get their
    /// own variants, everything else is passed through untouched.
    pub(crate) fn from_write(err: sqlx::Error, what: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return CatalogError::Conflict(what.into());
            }
            if db_err.is_foreign_key_violation() {
                return CatalogError::InvalidInput(format!(
                    "{} references a missing record",
                    what.into()
                ));
            }
        }
        CatalogError::Database(err)
    }
}
