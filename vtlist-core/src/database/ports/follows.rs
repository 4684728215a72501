use async_trait::async_trait;
use vtlist_model::{Follow, FollowTarget, ListenerId};

use crate::error::Result;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn create_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<Follow>;

    async fn delete_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<()>;

    async fn follows_of_listener(&self, follower: ListenerId) -> Result<Vec<Follow>>;
}
