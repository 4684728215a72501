use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use vtlist_model::{
    Favorite, FavoriteKey, ListenerId, TransmitKaraoke, TransmitMovie,
};

use super::catalog::{
    KARAOKE_COLUMNS, KARAOKE_JOIN, VTUBER_MOVIE_COLUMNS, VTUBER_MOVIE_JOIN,
};
use crate::{
    database::ports::favorites::FavoriteRepository,
    error::{CatalogError, Result},
};

/// Favorites counted per movie match on `movie_url` alone, so karaoke-level
/// favorites inside a movie also count toward the movie.
const MOVIE_FAVORITES_JOIN: &str = r#"
    LEFT JOIN favorites f
        ON f.movie_url = m.movie_url AND f.deleted_at IS NULL
"#;

const KARAOKE_FAVORITES_JOIN: &str = r#"
    LEFT JOIN favorites f
        ON f.movie_url = k.movie_url
       AND f.karaoke_id = k.karaoke_id
       AND f.deleted_at IS NULL
"#;

const MOVIE_GROUP: &str = r#"
    WHERE m.deleted_at IS NULL
    GROUP BY v.vtuber_id, m.movie_url
    ORDER BY m.created_at, m.movie_url
"#;

const KARAOKE_GROUP: &str = r#"
    WHERE k.deleted_at IS NULL
    GROUP BY v.vtuber_id, m.movie_url, k.karaoke_id
    ORDER BY k.karaoke_id
"#;

#[derive(Clone, Debug)]
pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn movies_with_fav_counts(&self) -> Result<Vec<TransmitMovie>> {
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS},
                    COUNT(f.id) AS count,
                    NULL::BOOLEAN AS is_fav
             {VTUBER_MOVIE_JOIN} {MOVIE_FAVORITES_JOIN} {MOVIE_GROUP}"
        );
        let rows = sqlx::query_as::<_, TransmitMovie>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn karaokes_with_fav_counts(&self) -> Result<Vec<TransmitKaraoke>> {
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS}, {KARAOKE_COLUMNS},
                    COUNT(f.id) AS count,
                    NULL::BOOLEAN AS is_fav
             {KARAOKE_JOIN} {KARAOKE_FAVORITES_JOIN} {KARAOKE_GROUP}"
        );
        let rows = sqlx::query_as::<_, TransmitKaraoke>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn favorites_of_listener(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, listener_id, movie_url, karaoke_id
            FROM favorites
            WHERE listener_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(listener)
        .fetch_all(self.pool())
        .await?;
        Ok(favorites)
    }

    async fn movie_favorite_count(&self, movie_url: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM favorites
            WHERE movie_url = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(movie_url)
        .fetch_one(self.pool())
        .await?;
        Ok(count)
    }

    async fn karaoke_favorite_count(&self, key: &FavoriteKey) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM favorites
            WHERE movie_url = $1 AND karaoke_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(&key.movie_url)
        .bind(key.karaoke_id)
        .fetch_one(self.pool())
        .await?;
        Ok(count)
    }

    async fn create_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<Favorite> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (listener_id, movie_url, karaoke_id)
            VALUES ($1, $2, $3)
            RETURNING id, listener_id, movie_url, karaoke_id
            "#,
        )
        .bind(listener)
        .bind(&key.movie_url)
        .bind(key.karaoke_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            CatalogError::from_write(
                e,
                format!("favorite on {} #{}", key.movie_url, key.karaoke_id),
            )
        })?;

        debug!(
            listener_id = %listener,
            movie_url = %key.movie_url,
            karaoke_id = %key.karaoke_id,
            "Created favorite"
        );
        Ok(favorite)
    }

    async fn delete_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE favorites
            SET deleted_at = NOW()
            WHERE listener_id = $1
              AND movie_url = $2
              AND karaoke_id = $3
              AND deleted_at IS NULL
            "#,
        )
        .bind(listener)
        .bind(&key.movie_url)
        .bind(key.karaoke_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!(
                "favorite on {} #{}",
                key.movie_url, key.karaoke_id
            )));
        }
        Ok(())
    }

    /// Count and flag come from one statement, so they always agree.
    async fn movies_with_fav_status(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<TransmitMovie>> {
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS},
                    COUNT(f.id) AS count,
                    COALESCE(BOOL_OR(f.listener_id = $1), FALSE) AS is_fav
             {VTUBER_MOVIE_JOIN} {MOVIE_FAVORITES_JOIN} {MOVIE_GROUP}"
        );
        let rows = sqlx::query_as::<_, TransmitMovie>(&sql)
            .bind(listener)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn karaokes_with_fav_status(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<TransmitKaraoke>> {
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS}, {KARAOKE_COLUMNS},
                    COUNT(f.id) AS count,
                    COALESCE(BOOL_OR(f.listener_id = $1), FALSE) AS is_fav
             {KARAOKE_JOIN} {KARAOKE_FAVORITES_JOIN} {KARAOKE_GROUP}"
        );
        let rows = sqlx::query_as::<_, TransmitKaraoke>(&sql)
            .bind(listener)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }
}
