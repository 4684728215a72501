use std::{fmt, sync::Arc};

use vtlist_core::application::{
    AppUnitOfWork, CatalogInteractor, ContentInteractor, FavoriteInteractor,
    FollowInteractor, ListenerInteractor,
};
use vtlist_core::domain::credentials::PasswordCrypto;
use vtlist_model::{Karaoke, Movie, Vtuber};

use crate::infra::config::Config;
use crate::users::auth::JwtKeys;

/// Everything a handler needs, wired once at startup. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtKeys>,

    pub vtubers: ContentInteractor<Vtuber>,
    pub movies: ContentInteractor<Movie>,
    pub karaokes: ContentInteractor<Karaoke>,
    pub catalog: CatalogInteractor,
    pub favorites: FavoriteInteractor,
    pub follows: FollowInteractor,
    pub listeners: ListenerInteractor,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("unit_of_work", &self.unit_of_work)
            .field("dev_mode", &self.config.dev_mode)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        unit_of_work: Arc<AppUnitOfWork>,
        crypto: Arc<PasswordCrypto>,
        config: Arc<Config>,
    ) -> Self {
        let uow = unit_of_work.as_ref();
        Self {
            jwt: Arc::new(JwtKeys::from_config(&config.auth)),
            vtubers: ContentInteractor::new(uow.vtubers.clone()),
            movies: ContentInteractor::new(uow.movies.clone()),
            karaokes: ContentInteractor::new(uow.karaokes.clone()),
            catalog: CatalogInteractor::new(
                uow.catalog.clone(),
                uow.vtubers.clone(),
                uow.movies.clone(),
                uow.karaokes.clone(),
            ),
            favorites: FavoriteInteractor::new(
                uow.favorites.clone(),
                uow.vtubers.clone(),
                uow.movies.clone(),
                uow.karaokes.clone(),
            ),
            follows: FollowInteractor::new(
                uow.follows.clone(),
                uow.vtubers.clone(),
                uow.listeners.clone(),
            ),
            listeners: ListenerInteractor::new(uow.listeners.clone(), crypto),
            config,
            unit_of_work,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
