use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};
use vtlist_model::Listener;

use crate::database::ports::listeners::ListenerRepository;
use crate::domain::credentials::{
    PasswordCrypto, validate_listener_name, validate_password,
};
use crate::error::{CatalogError, Result};

/// Account registration and password log-in. Token issuing is left to the
/// HTTP layer.
#[derive(Clone)]
pub struct ListenerInteractor {
    listeners: Arc<dyn ListenerRepository>,
    crypto: Arc<PasswordCrypto>,
}

impl fmt::Debug for ListenerInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerInteractor")
            .field("listeners_repo", &Arc::strong_count(&self.listeners))
            .field("crypto", &self.crypto)
            .finish()
    }
}

impl ListenerInteractor {
    pub fn new(
        listeners: Arc<dyn ListenerRepository>,
        crypto: Arc<PasswordCrypto>,
    ) -> Self {
        Self { listeners, crypto }
    }

    pub async fn sign_up(&self, listener_name: &str, password: &str) -> Result<Listener> {
        validate_listener_name(listener_name)?;
        validate_password(password)?;

        let password_hash = self.crypto.hash_password(password)?;
        self.listeners
            .create_listener(listener_name, &password_hash)
            .await
    }

    /// Unknown names and wrong passwords are indistinguishable to the caller.
    pub async fn log_in(&self, listener_name: &str, password: &str) -> Result<Listener> {
        let Some(credentials) = self
            .listeners
            .find_credentials_by_name(listener_name)
            .await?
        else {
            warn!(listener_name, "log-in for unknown listener");
            return Err(CatalogError::InvalidCredentials);
        };

        if !self
            .crypto
            .verify_password(password, &credentials.password_hash)?
        {
            warn!(listener_id = %credentials.listener.listener_id, "log-in with wrong password");
            return Err(CatalogError::InvalidCredentials);
        }

        info!(listener_id = %credentials.listener.listener_id, "listener logged in");
        Ok(credentials.listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryStore;
    use argon2::ParamsBuilder;

    fn interactor() -> ListenerInteractor {
        let (_, uow) = MemoryStore::default().into_unit_of_work();
        let params = ParamsBuilder::new()
            .m_cost(1024)
            .t_cost(1)
            .p_cost(1)
            .build()
            .unwrap();
        let crypto = PasswordCrypto::with_params("test-pepper", params).unwrap();
        ListenerInteractor::new(uow.listeners, Arc::new(crypto))
    }

    #[tokio::test]
    async fn sign_up_then_log_in() {
        let listeners = interactor();
        let created = listeners.sign_up("suisei-fan", "comet-1234").await.unwrap();

        let logged_in = listeners.log_in("suisei-fan", "comet-1234").await.unwrap();
        assert_eq!(logged_in, created);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_name_look_the_same() {
        let listeners = interactor();
        listeners.sign_up("suisei-fan", "comet-1234").await.unwrap();

        assert!(matches!(
            listeners.log_in("suisei-fan", "comet-9999").await,
            Err(CatalogError::InvalidCredentials)
        ));
        assert!(matches!(
            listeners.log_in("nobody", "comet-1234").await,
            Err(CatalogError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn duplicate_name_and_short_password_are_rejected() {
        let listeners = interactor();
        listeners.sign_up("suisei-fan", "comet-1234").await.unwrap();

        assert!(matches!(
            listeners.sign_up("suisei-fan", "another-pass").await,
            Err(CatalogError::Conflict(_))
        ));
        assert!(matches!(
            listeners.sign_up("new-fan", "short").await,
            Err(CatalogError::InvalidInput(_))
        ));
    }
}
