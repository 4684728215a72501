use async_trait::async_trait;
use vtlist_model::ContentRecord;

use crate::error::Result;

/// CRUD over one kind of catalogue record. Deletes are soft: the row stays
/// but disappears from every read.
#[async_trait]
pub trait ContentRepository<E: ContentRecord>: Send + Sync {
    /// Persist `record` and return it with its generated key filled in.
    async fn create(&self, record: &E) -> Result<E>;

    /// Overwrite the mutable columns of the live row keyed by `record`.
    async fn update(&self, record: &E) -> Result<()>;

    async fn delete(&self, key: &E::Key) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<E>>;

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>>;
}
