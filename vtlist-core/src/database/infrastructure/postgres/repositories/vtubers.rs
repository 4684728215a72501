use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use vtlist_model::{Vtuber, VtuberId};

use crate::{
    database::ports::content::ContentRepository,
    error::{CatalogError, Result},
};

const VTUBER_COLUMNS: &str =
    "vtuber_id, vtuber_name, vtuber_kana, intro_movie_url, vtuber_inputter_id";

#[derive(Clone, Debug)]
pub struct PostgresVtuberRepository {
    pool: PgPool,
}

impl PostgresVtuberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentRepository<Vtuber> for PostgresVtuberRepository {
    async fn create(&self, record: &Vtuber) -> Result<Vtuber> {
        let created = sqlx::query_as::<_, Vtuber>(&format!(
            r#"
            INSERT INTO vtubers (vtuber_name, vtuber_kana, intro_movie_url, vtuber_inputter_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {VTUBER_COLUMNS}
            "#
        ))
        .bind(&record.vtuber_name)
        .bind(&record.vtuber_kana)
        .bind(&record.intro_movie_url)
        .bind(record.vtuber_inputter_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("vtuber {}", record.vtuber_name))
        })?;

        debug!(vtuber_id = %created.vtuber_id, "Created vtuber");
        Ok(created)
    }

    async fn update(&self, record: &Vtuber) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vtubers
            SET vtuber_name = $2,
                vtuber_kana = $3,
                intro_movie_url = $4,
                updated_at = NOW()
            WHERE vtuber_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(record.vtuber_id)
        .bind(&record.vtuber_name)
        .bind(&record.vtuber_kana)
        .bind(&record.intro_movie_url)
        .execute(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("vtuber {}", record.vtuber_name))
        })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!(
                "vtuber {}",
                record.vtuber_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, key: &VtuberId) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vtubers
            SET deleted_at = NOW()
            WHERE vtuber_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(*key)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!("vtuber {}", key)));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Vtuber>> {
        let vtubers = sqlx::query_as::<_, Vtuber>(&format!(
            r#"
            SELECT {VTUBER_COLUMNS}
            FROM vtubers
            WHERE deleted_at IS NULL
            ORDER BY vtuber_id
            "#
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(vtubers)
    }

    async fn find_by_key(&self, key: &VtuberId) -> Result<Option<Vtuber>> {
        let vtuber = sqlx::query_as::<_, Vtuber>(&format!(
            r#"
            SELECT {VTUBER_COLUMNS}
            FROM vtubers
            WHERE vtuber_id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(*key)
        .fetch_optional(self.pool())
        .await?;
        Ok(vtuber)
    }
}
