use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use vtlist_model::Movie;

use crate::{
    database::ports::content::ContentRepository,
    error::{CatalogError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentRepository<Movie> for PostgresMovieRepository {
    /// `movie_url` is the primary key, so a soft-deleted movie is revived in
    /// place instead of inserted. A live movie with the same URL is a conflict.
    async fn create(&self, record: &Movie) -> Result<Movie> {
        let created = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (movie_url, movie_title, vtuber_id, movie_inputter_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (movie_url) DO UPDATE
            SET movie_title = EXCLUDED.movie_title,
                vtuber_id = EXCLUDED.vtuber_id,
                movie_inputter_id = EXCLUDED.movie_inputter_id,
                created_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
            WHERE movies.deleted_at IS NOT NULL
            RETURNING movie_url, movie_title, vtuber_id, movie_inputter_id
            "#,
        )
        .bind(&record.movie_url)
        .bind(&record.movie_title)
        .bind(record.vtuber_id)
        .bind(record.movie_inputter_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("movie {}", record.movie_url))
        })?
        .ok_or_else(|| {
            CatalogError::Conflict(format!("movie {}", record.movie_url))
        })?;

        debug!(movie_url = %created.movie_url, "Created movie");
        Ok(created)
    }

    async fn update(&self, record: &Movie) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET movie_title = $2,
                vtuber_id = $3,
                updated_at = NOW()
            WHERE movie_url = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(&record.movie_url)
        .bind(&record.movie_title)
        .bind(record.vtuber_id)
        .execute(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(e, format!("movie {}", record.movie_url))
        })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!(
                "movie {}",
                record.movie_url
            )));
        }
        Ok(())
    }

    /// Soft-deletes the movie and every favorite on it, karaoke-level ones
    /// included, so a later revive starts from zero.
    async fn delete(&self, key: &String) -> Result<()> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE movies
            SET deleted_at = NOW()
            WHERE movie_url = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(key)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!("movie {}", key)));
        }

        let cleared = sqlx::query(
            r#"
            UPDATE favorites
            SET deleted_at = NOW()
            WHERE movie_url = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(key)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(
            movie_url = %key,
            favorites = cleared.rows_affected(),
            "Deleted movie"
        );
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT movie_url, movie_title, vtuber_id, movie_inputter_id
            FROM movies
            WHERE deleted_at IS NULL
            ORDER BY created_at, movie_url
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(movies)
    }

    async fn find_by_key(&self, key: &String) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT movie_url, movie_title, vtuber_id, movie_inputter_id
            FROM movies
            WHERE movie_url = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool())
        .await?;
        Ok(movie)
    }
}
