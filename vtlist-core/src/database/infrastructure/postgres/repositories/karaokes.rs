use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use vtlist_model::{Karaoke, KaraokeId};

use crate::{
    database::ports::content::ContentRepository,
    error::{CatalogError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresKaraokeRepository {
    pool: PgPool,
}

impl PostgresKaraokeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentRepository<Karaoke> for PostgresKaraokeRepository {
    async fn create(&self, record: &Karaoke) -> Result<Karaoke> {
        let created = sqlx::query_as::<_, Karaoke>(
            r#"
            INSERT INTO karaokes (movie_url, sing_start, song_name, karaoke_inputter_id)
            VALUES ($1, $2, $3, $4)
            RETURNING karaoke_id, movie_url, sing_start, song_name, karaoke_inputter_id
            "#,
        )
        .bind(&record.movie_url)
        .bind(&record.sing_start)
        .bind(&record.song_name)
        .bind(record.karaoke_inputter_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(
                e,
                format!("karaoke {} in {}", record.song_name, record.movie_url),
            )
        })?;

        debug!(karaoke_id = %created.karaoke_id, "Created karaoke");
        Ok(created)
    }

    /// `movie_url` is fixed at creation: favorites are keyed through it.
    async fn update(&self, record: &Karaoke) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE karaokes
            SET sing_start = $2,
                song_name = $3,
                updated_at = NOW()
            WHERE karaoke_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(record.karaoke_id)
        .bind(&record.sing_start)
        .bind(&record.song_name)
        .execute(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("karaoke {}", record.karaoke_id))
        })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!(
                "karaoke {}",
                record.karaoke_id
            )));
        }
        Ok(())
    }

    /// Soft-deletes the karaoke together with the favorites pointing at it.
    async fn delete(&self, key: &KaraokeId) -> Result<()> {
        let mut tx = self.pool().begin().await?;

        let movie_url: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE karaokes
            SET deleted_at = NOW()
            WHERE karaoke_id = $1 AND deleted_at IS NULL
            RETURNING movie_url
            "#,
        )
        .bind(*key)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(movie_url) = movie_url else {
            return Err(CatalogError::NotFound(format!("karaoke {}", key)));
        };

        let cleared = sqlx::query(
            r#"
            UPDATE favorites
            SET deleted_at = NOW()
            WHERE movie_url = $1 AND karaoke_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(&movie_url)
        .bind(*key)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(
            karaoke_id = %key,
            favorites = cleared.rows_affected(),
            "Deleted karaoke"
        );
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Karaoke>> {
        let karaokes = sqlx::query_as::<_, Karaoke>(
            r#"
            SELECT karaoke_id, movie_url, sing_start, song_name, karaoke_inputter_id
            FROM karaokes
            WHERE deleted_at IS NULL
            ORDER BY karaoke_id
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(karaokes)
    }

    async fn find_by_key(&self, key: &KaraokeId) -> Result<Option<Karaoke>> {
        let karaoke = sqlx::query_as::<_, Karaoke>(
            r#"
            SELECT karaoke_id, movie_url, sing_start, song_name, karaoke_inputter_id
            FROM karaokes
            WHERE karaoke_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(*key)
        .fetch_optional(self.pool())
        .await?;
        Ok(karaoke)
    }
}
