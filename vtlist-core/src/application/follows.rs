use std::fmt;
use std::sync::Arc;

use tracing::info;
use vtlist_model::{Follow, FollowTarget, ListenerId, Vtuber, VtuberId};

use crate::database::ports::{
    content::ContentRepository, follows::FollowRepository,
    listeners::ListenerRepository,
};
use crate::error::{CatalogError, Result};

#[derive(Clone)]
pub struct FollowInteractor {
    follows: Arc<dyn FollowRepository>,
    vtubers: Arc<dyn ContentRepository<Vtuber>>,
    listeners: Arc<dyn ListenerRepository>,
}

impl fmt::Debug for FollowInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FollowInteractor")
            .field("follows_repo", &Arc::strong_count(&self.follows))
            .finish_non_exhaustive()
    }
}

impl FollowInteractor {
    pub fn new(
        follows: Arc<dyn FollowRepository>,
        vtubers: Arc<dyn ContentRepository<Vtuber>>,
        listeners: Arc<dyn ListenerRepository>,
    ) -> Self {
        Self {
            follows,
            vtubers,
            listeners,
        }
    }

    pub async fn follow_vtuber(
        &self,
        follower: ListenerId,
        vtuber: VtuberId,
    ) -> Result<Follow> {
        if self.vtubers.find_by_key(&vtuber).await?.is_none() {
            return Err(CatalogError::NotFound(format!("vtuber {}", vtuber)));
        }
        self.create(follower, FollowTarget::Vtuber(vtuber)).await
    }

    pub async fn follow_listener(
        &self,
        follower: ListenerId,
        followed: ListenerId,
    ) -> Result<Follow> {
        if follower == followed {
            return Err(CatalogError::InvalidInput(
                "listeners cannot follow themselves".into(),
            ));
        }
        if self.listeners.find_by_id(followed).await?.is_none() {
            return Err(CatalogError::NotFound(format!("listener {}", followed)));
        }
        self.create(follower, FollowTarget::Listener(followed)).await
    }

    /// Dispatch on the target kind.
    pub async fn follow(&self, follower: ListenerId, target: FollowTarget) -> Result<Follow> {
        match target {
            FollowTarget::Vtuber(id) => self.follow_vtuber(follower, id).await,
            FollowTarget::Listener(id) => self.follow_listener(follower, id).await,
        }
    }

    pub async fn unfollow(&self, follower: ListenerId, target: FollowTarget) -> Result<()> {
        self.follows.delete_follow(follower, target).await?;
        info!(follower = %follower, ?target, "unfollowed");
        Ok(())
    }

    pub async fn follows_of(&self, follower: ListenerId) -> Result<Vec<Follow>> {
        self.follows.follows_of_listener(follower).await
    }

    async fn create(&self, follower: ListenerId, target: FollowTarget) -> Result<Follow> {
        let follow = self.follows.create_follow(follower, target).await?;
        info!(follower = %follower, ?target, "followed");
        Ok(follow)
    }
}
