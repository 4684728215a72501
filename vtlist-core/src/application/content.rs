use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use vtlist_model::{ContentRecord, ListenerId};

use crate::database::ports::content::ContentRepository;
use crate::domain::authz::can_modify;
use crate::error::{CatalogError, Result};

/// Create/edit/delete for one kind of catalogue record.
///
/// Writes are attributed to the requester: creation stamps them as inputter,
/// and edits or deletes are refused unless they match the stored inputter.
pub struct ContentInteractor<E: ContentRecord> {
    repository: Arc<dyn ContentRepository<E>>,
}

impl<E: ContentRecord> Clone for ContentInteractor<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: ContentRecord> fmt::Debug for ContentInteractor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentInteractor")
            .field("kind", &E::KIND)
            .field("repository", &Arc::strong_count(&self.repository))
            .finish()
    }
}

impl<E: ContentRecord> ContentInteractor<E> {
    pub fn new(repository: Arc<dyn ContentRepository<E>>) -> Self {
        Self { repository }
    }

    /// Persist `record` with the requester as inputter. Any inputter present
    /// on the incoming record is overwritten.
    pub async fn create(&self, requester: ListenerId, mut record: E) -> Result<E> {
        record.stamp_inputter(requester);
        let created = self.repository.create(&record).await?;
        info!(kind = E::KIND, key = %created.key(), listener_id = %requester, "content created");
        Ok(created)
    }

    /// Whether `requester` may modify the stored record sharing `record`'s
    /// key. Only the stored snapshot is consulted.
    pub async fn verify_user_modify(
        &self,
        requester: ListenerId,
        record: &E,
    ) -> Result<bool> {
        self.verify_key(requester, &record.key()).await
    }

    async fn verify_key(&self, requester: ListenerId, key: &E::Key) -> Result<bool> {
        let stored = self.stored(key).await?;
        Ok(can_modify(requester, &stored))
    }

    async fn stored(&self, key: &E::Key) -> Result<E> {
        self.repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("{} {}", E::KIND, key)))
    }

    /// Overwrite the stored record. A record never moves to another parent;
    /// such an edit is rejected as invalid input.
    pub async fn update(&self, requester: ListenerId, record: E) -> Result<()> {
        let stored = self.stored(&record.key()).await?;
        if !can_modify(requester, &stored) {
            warn!(kind = E::KIND, key = %record.key(), listener_id = %requester, "edit refused");
            return Err(CatalogError::Forbidden(E::KIND));
        }
        if record.changes_parent(&stored) {
            warn!(kind = E::KIND, key = %record.key(), listener_id = %requester, "parent change refused");
            return Err(CatalogError::InvalidInput(format!(
                "{} {} cannot move to another parent",
                E::KIND,
                record.key()
            )));
        }
        self.repository.update(&record).await
    }

    pub async fn delete(&self, requester: ListenerId, key: &E::Key) -> Result<()> {
        if !self.verify_key(requester, key).await? {
            warn!(kind = E::KIND, key = %key, listener_id = %requester, "delete refused");
            return Err(CatalogError::Forbidden(E::KIND));
        }
        self.repository.delete(key).await?;
        info!(kind = E::KIND, key = %key, listener_id = %requester, "content deleted");
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<E>> {
        self.repository.find_all().await
    }

    pub async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>> {
        self.repository.find_by_key(key).await
    }
}
