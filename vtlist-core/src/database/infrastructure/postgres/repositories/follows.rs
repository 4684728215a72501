use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use vtlist_model::{Follow, FollowTarget, ListenerId};

use crate::{
    database::ports::follows::FollowRepository,
    error::{CatalogError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<Follow> {
        let (vtuber_id, listener_id) = target.columns();
        let follow = sqlx::query_as::<_, Follow>(
            r#"
            INSERT INTO follows (follow_listener_id, followed_vtuber_id, followed_listener_id)
            VALUES ($1, $2, $3)
            RETURNING id, follow_listener_id, followed_vtuber_id, followed_listener_id
            "#,
        )
        .bind(follower)
        .bind(vtuber_id)
        .bind(listener_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| CatalogError::from_write(e, format!("follow of {:?}", target)))?;

        debug!(follower = %follower, ?target, "Created follow");
        Ok(follow)
    }

    async fn delete_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<()> {
        let (vtuber_id, listener_id) = target.columns();
        let result = sqlx::query(
            r#"
            UPDATE follows
            SET deleted_at = NOW()
            WHERE follow_listener_id = $1
              AND followed_vtuber_id = $2
              AND followed_listener_id = $3
              AND deleted_at IS NULL
            "#,
        )
        .bind(follower)
        .bind(vtuber_id)
        .bind(listener_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!("follow of {:?}", target)));
        }
        Ok(())
    }

    async fn follows_of_listener(&self, follower: ListenerId) -> Result<Vec<Follow>> {
        let follows = sqlx::query_as::<_, Follow>(
            r#"
            SELECT id, follow_listener_id, followed_vtuber_id, followed_listener_id
            FROM follows
            WHERE follow_listener_id = $1 AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(follower)
        .fetch_all(self.pool())
        .await?;
        Ok(follows)
    }
}
