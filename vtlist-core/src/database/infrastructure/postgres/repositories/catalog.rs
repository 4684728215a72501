use async_trait::async_trait;
use sqlx::PgPool;
use vtlist_model::{VtuberMovie, VtuberMovieKaraoke};

use crate::{database::ports::catalog::CatalogRepository, error::Result};

/// Select list for the `v ⋈ m` join. `vtuber_id` is emitted once and shared
/// by both flattened records.
pub(super) const VTUBER_MOVIE_COLUMNS: &str = r#"
    v.vtuber_id, v.vtuber_name, v.vtuber_kana, v.intro_movie_url, v.vtuber_inputter_id,
    m.movie_url, m.movie_title, m.movie_inputter_id
"#;

pub(super) const KARAOKE_COLUMNS: &str = r#"
    k.karaoke_id, k.sing_start, k.song_name, k.karaoke_inputter_id
"#;

pub(super) const VTUBER_MOVIE_JOIN: &str = r#"
    FROM movies m
    JOIN vtubers v ON v.vtuber_id = m.vtuber_id AND v.deleted_at IS NULL
"#;

pub(super) const KARAOKE_JOIN: &str = r#"
    FROM karaokes k
    JOIN movies m ON m.movie_url = k.movie_url AND m.deleted_at IS NULL
    JOIN vtubers v ON v.vtuber_id = m.vtuber_id AND v.deleted_at IS NULL
"#;

#[derive(Clone, Debug)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn vtubers_movies(&self) -> Result<Vec<VtuberMovie>> {
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS} {VTUBER_MOVIE_JOIN}
             WHERE m.deleted_at IS NULL
             ORDER BY m.created_at, m.movie_url"
        );
        let rows = sqlx::query_as::<_, VtuberMovie>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn vtubers_movies_karaokes(&self) -> Result<Vec<VtuberMovieKaraoke>> {
        // movie_url is read by both the movie and the karaoke record
        let sql = format!(
            "SELECT {VTUBER_MOVIE_COLUMNS}, {KARAOKE_COLUMNS} {KARAOKE_JOIN}
             WHERE k.deleted_at IS NULL
             ORDER BY k.karaoke_id"
        );
        let rows = sqlx::query_as::<_, VtuberMovieKaraoke>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }
}
