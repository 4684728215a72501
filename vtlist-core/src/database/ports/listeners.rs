use async_trait::async_trait;
use vtlist_model::{Listener, ListenerId};

use crate::error::Result;

/// Listener row including the stored password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct ListenerCredentials {
    pub listener: Listener,
    pub password_hash: String,
}

#[async_trait]
pub trait ListenerRepository: Send + Sync {
    /// Fails with `CatalogError::Conflict` when the name is taken.
    async fn create_listener(
        &self,
        listener_name: &str,
        password_hash: &str,
    ) -> Result<Listener>;

    async fn find_credentials_by_name(
        &self,
        listener_name: &str,
    ) -> Result<Option<ListenerCredentials>>;

    async fn find_by_id(&self, id: ListenerId) -> Result<Option<Listener>>;
}
