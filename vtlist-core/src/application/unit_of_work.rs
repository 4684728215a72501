use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use vtlist_model::{Karaoke, Movie, Vtuber};

use crate::database::{
    infrastructure::postgres::{
        PostgresCatalogRepository, PostgresFavoriteRepository,
        PostgresFollowRepository, PostgresKaraokeRepository,
        PostgresListenerRepository, PostgresMovieRepository,
        PostgresVtuberRepository,
    },
    ports::{
        catalog::CatalogRepository, content::ContentRepository,
        favorites::FavoriteRepository, follows::FollowRepository,
        listeners::ListenerRepository,
    },
    postgres::PostgresDatabase,
};

/// Every repository port the interactors use, behind trait objects.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub vtubers: Arc<dyn ContentRepository<Vtuber>>,
    pub movies: Arc<dyn ContentRepository<Movie>>,
    pub karaokes: Arc<dyn ContentRepository<Karaoke>>,
    pub catalog: Arc<dyn CatalogRepository>,

    pub favorites: Arc<dyn FavoriteRepository>,
    pub follows: Arc<dyn FollowRepository>,

    pub listeners: Arc<dyn ListenerRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("vtubers", &type_name_of_val(self.vtubers.as_ref()))
            .field("movies", &type_name_of_val(self.movies.as_ref()))
            .field("karaokes", &type_name_of_val(self.karaokes.as_ref()))
            .field("catalog", &type_name_of_val(self.catalog.as_ref()))
            .field("favorites", &type_name_of_val(self.favorites.as_ref()))
            .field("follows", &type_name_of_val(self.follows.as_ref()))
            .field("listeners", &type_name_of_val(self.listeners.as_ref()))
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    vtubers: Option<Arc<dyn ContentRepository<Vtuber>>>,
    movies: Option<Arc<dyn ContentRepository<Movie>>>,
    karaokes: Option<Arc<dyn ContentRepository<Karaoke>>>,
    catalog: Option<Arc<dyn CatalogRepository>>,
    favorites: Option<Arc<dyn FavoriteRepository>>,
    follows: Option<Arc<dyn FollowRepository>>,
    listeners: Option<Arc<dyn ListenerRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("vtubers", &self.vtubers.is_some())
            .field("movies", &self.movies.is_some())
            .field("karaokes", &self.karaokes.is_some())
            .field("catalog", &self.catalog.is_some())
            .field("favorites", &self.favorites.is_some())
            .field("follows", &self.follows.is_some())
            .field("listeners", &self.listeners.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vtubers(mut self, repo: Arc<dyn ContentRepository<Vtuber>>) -> Self {
        self.vtubers = Some(repo);
        self
    }
    pub fn with_movies(mut self, repo: Arc<dyn ContentRepository<Movie>>) -> Self {
        self.movies = Some(repo);
        self
    }
    pub fn with_karaokes(
        mut self,
        repo: Arc<dyn ContentRepository<Karaoke>>,
    ) -> Self {
        self.karaokes = Some(repo);
        self
    }
    pub fn with_catalog(mut self, repo: Arc<dyn CatalogRepository>) -> Self {
        self.catalog = Some(repo);
        self
    }
    pub fn with_favorites(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorites = Some(repo);
        self
    }
    pub fn with_follows(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follows = Some(repo);
        self
    }
    pub fn with_listeners(mut self, repo: Arc<dyn ListenerRepository>) -> Self {
        self.listeners = Some(repo);
        self
    }

    /// Returns a string error naming the first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            vtubers: self
                .vtubers
                .ok_or_else(|| "missing vtuber ContentRepository".to_string())?,
            movies: self
                .movies
                .ok_or_else(|| "missing movie ContentRepository".to_string())?,
            karaokes: self
                .karaokes
                .ok_or_else(|| "missing karaoke ContentRepository".to_string())?,
            catalog: self
                .catalog
                .ok_or_else(|| "missing CatalogRepository".to_string())?,
            favorites: self
                .favorites
                .ok_or_else(|| "missing FavoriteRepository".to_string())?,
            follows: self
                .follows
                .ok_or_else(|| "missing FollowRepository".to_string())?,
            listeners: self
                .listeners
                .ok_or_else(|| "missing ListenerRepository".to_string())?,
        })
    }

    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(mut self, db: &PostgresDatabase) -> Self {
        let pool = db.pool().clone();

        self.vtubers = Some(Arc::new(PostgresVtuberRepository::new(pool.clone())));
        self.movies = Some(Arc::new(PostgresMovieRepository::new(pool.clone())));
        self.karaokes =
            Some(Arc::new(PostgresKaraokeRepository::new(pool.clone())));
        self.catalog =
            Some(Arc::new(PostgresCatalogRepository::new(pool.clone())));
        self.favorites =
            Some(Arc::new(PostgresFavoriteRepository::new(pool.clone())));
        self.follows = Some(Arc::new(PostgresFollowRepository::new(pool.clone())));
        self.listeners = Some(Arc::new(PostgresListenerRepository::new(pool)));

        self
    }
}

impl AppUnitOfWork {
    /// Compose all Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: &PostgresDatabase) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}
