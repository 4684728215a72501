use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::info;
use vtlist_model::{Listener, ListenerId};

use crate::{
    database::ports::listeners::{ListenerCredentials, ListenerRepository},
    error::{CatalogError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresListenerRepository {
    pool: PgPool,
}

impl PostgresListenerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ListenerRepository for PostgresListenerRepository {
    async fn create_listener(
        &self,
        listener_name: &str,
        password_hash: &str,
    ) -> Result<Listener> {
        let listener = sqlx::query_as::<_, Listener>(
            r#"
            INSERT INTO listeners (listener_name, password_hash)
            VALUES ($1, $2)
            RETURNING listener_id, listener_name
            "#,
        )
        .bind(listener_name)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("listener {}", listener_name))
        })?;

        info!(listener_id = %listener.listener_id, "Registered listener");
        Ok(listener)
    }

    async fn find_credentials_by_name(
        &self,
        listener_name: &str,
    ) -> Result<Option<ListenerCredentials>> {
        let row = sqlx::query(
            r#"
            SELECT listener_id, listener_name, password_hash
            FROM listeners
            WHERE listener_name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(listener_name)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| -> Result<ListenerCredentials> {
            Ok(ListenerCredentials {
                listener: Listener {
                    listener_id: row.try_get("listener_id")?,
                    listener_name: row.try_get("listener_name")?,
                },
                password_hash: row.try_get("password_hash")?,
            })
        })
        .transpose()
    }

    async fn find_by_id(&self, id: ListenerId) -> Result<Option<Listener>> {
        let listener = sqlx::query_as::<_, Listener>(
            r#"
            SELECT listener_id, listener_name
            FROM listeners
            WHERE listener_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(listener)
    }
}
