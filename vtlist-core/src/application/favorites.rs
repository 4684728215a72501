use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use vtlist_model::{
    Favorite, FavoriteKey, Karaoke, KaraokeFavoriteCount, ListenerId, Movie,
    MovieFavoriteCount, TransmitKaraoke, TransmitMovie, Vtuber,
};

use crate::database::ports::{
    content::ContentRepository, favorites::FavoriteRepository,
};
use crate::domain::partial::{Partial, WarningLog};
use crate::error::{CatalogError, Result};

/// Collections shown on the landing page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopPage {
    pub vtubers: Vec<Vtuber>,
    pub vtubers_movies: Vec<TransmitMovie>,
    pub vtubers_movies_karaokes: Vec<TransmitKaraoke>,
}

/// Favorite counts, per-listener favorite status and favorite toggles.
#[derive(Clone)]
pub struct FavoriteInteractor {
    favorites: Arc<dyn FavoriteRepository>,
    vtubers: Arc<dyn ContentRepository<Vtuber>>,
    movies: Arc<dyn ContentRepository<Movie>>,
    karaokes: Arc<dyn ContentRepository<Karaoke>>,
}

impl fmt::Debug for FavoriteInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoriteInteractor")
            .field("favorites_repo", &Arc::strong_count(&self.favorites))
            .finish_non_exhaustive()
    }
}

impl FavoriteInteractor {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        vtubers: Arc<dyn ContentRepository<Vtuber>>,
        movies: Arc<dyn ContentRepository<Movie>>,
        karaokes: Arc<dyn ContentRepository<Karaoke>>,
    ) -> Self {
        Self {
            favorites,
            vtubers,
            movies,
            karaokes,
        }
    }

    pub async fn get_vtubers_movies_with_fav_cnts(&self) -> Result<Vec<TransmitMovie>> {
        self.favorites.movies_with_fav_counts().await
    }

    pub async fn get_vtubers_movies_karaokes_with_fav_cnts(
        &self,
    ) -> Result<Vec<TransmitKaraoke>> {
        self.favorites.karaokes_with_fav_counts().await
    }

    pub async fn find_favs_of_user(&self, listener: ListenerId) -> Result<Vec<Favorite>> {
        self.favorites.favorites_of_listener(listener).await
    }

    /// Assemble the landing page.
    ///
    /// With a requester, movie and karaoke rows carry `is_fav`. Should the
    /// status read fail, the slot falls back to plain counts (no `is_fav`) and
    /// both failures are reported as warnings. Without a requester no status
    /// is looked up at all.
    pub async fn top_page(&self, requester: Option<ListenerId>) -> Partial<TopPage> {
        let mut log = WarningLog::new();

        let vtubers = log.take("vtubers", self.vtubers.find_all().await);

        let (vtubers_movies, vtubers_movies_karaokes) = match requester {
            Some(listener) => {
                let movies = match self.favorites.movies_with_fav_status(listener).await {
                    Ok(movies) => movies,
                    Err(err) => {
                        log.record("favorite movies", &err);
                        log.take("vtubers_movies", self.favorites.movies_with_fav_counts().await)
                    }
                };
                let karaokes = match self.favorites.karaokes_with_fav_status(listener).await
                {
                    Ok(karaokes) => karaokes,
                    Err(err) => {
                        log.record("favorite karaokes", &err);
                        log.take(
                            "vtubers_movies_karaokes",
                            self.favorites.karaokes_with_fav_counts().await,
                        )
                    }
                };
                (movies, karaokes)
            }
            None => (
                log.take("vtubers_movies", self.favorites.movies_with_fav_counts().await),
                log.take(
                    "vtubers_movies_karaokes",
                    self.favorites.karaokes_with_fav_counts().await,
                ),
            ),
        };

        log.finish(TopPage {
            vtubers,
            vtubers_movies,
            vtubers_movies_karaokes,
        })
    }

    pub async fn favorite_movie(
        &self,
        listener: ListenerId,
        movie_url: &str,
    ) -> Result<MovieFavoriteCount> {
        let movie = self.live_movie(movie_url).await?;
        self.favorites
            .create_favorite(listener, &FavoriteKey::movie(movie_url))
            .await?;
        info!(listener_id = %listener, movie_url, "movie favorited");
        self.movie_count(movie).await
    }

    pub async fn unfavorite_movie(
        &self,
        listener: ListenerId,
        movie_url: &str,
    ) -> Result<MovieFavoriteCount> {
        let movie = self.live_movie(movie_url).await?;
        self.favorites
            .delete_favorite(listener, &FavoriteKey::movie(movie_url))
            .await?;
        info!(listener_id = %listener, movie_url, "movie unfavorited");
        self.movie_count(movie).await
    }

    pub async fn favorite_karaoke(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<KaraokeFavoriteCount> {
        let karaoke = self.live_karaoke(key).await?;
        self.favorites.create_favorite(listener, key).await?;
        info!(
            listener_id = %listener,
            movie_url = %key.movie_url,
            karaoke_id = %key.karaoke_id,
            "karaoke favorited"
        );
        self.karaoke_count(karaoke, key).await
    }

    pub async fn unfavorite_karaoke(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<KaraokeFavoriteCount> {
        let karaoke = self.live_karaoke(key).await?;
        self.favorites.delete_favorite(listener, key).await?;
        info!(
            listener_id = %listener,
            movie_url = %key.movie_url,
            karaoke_id = %key.karaoke_id,
            "karaoke unfavorited"
        );
        self.karaoke_count(karaoke, key).await
    }

    async fn live_movie(&self, movie_url: &str) -> Result<Movie> {
        self.movies
            .find_by_key(&movie_url.to_string())
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("movie {}", movie_url)))
    }

    /// The karaoke must exist and sit inside `key.movie_url`.
    async fn live_karaoke(&self, key: &FavoriteKey) -> Result<Karaoke> {
        if key.karaoke_id.is_none() {
            return Err(CatalogError::InvalidInput(
                "karaoke favorites need a karaoke_id".into(),
            ));
        }
        let karaoke = self
            .karaokes
            .find_by_key(&key.karaoke_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("karaoke {}", key.karaoke_id)))?;
        if karaoke.movie_url != key.movie_url {
            return Err(CatalogError::InvalidInput(format!(
                "karaoke {} is not part of {}",
                key.karaoke_id, key.movie_url
            )));
        }
        Ok(karaoke)
    }

    async fn movie_count(&self, movie: Movie) -> Result<MovieFavoriteCount> {
        let count = self.favorites.movie_favorite_count(&movie.movie_url).await?;
        Ok(MovieFavoriteCount { movie, count })
    }

    async fn karaoke_count(
        &self,
        karaoke: Karaoke,
        key: &FavoriteKey,
    ) -> Result<KaraokeFavoriteCount> {
        let count = self.favorites.karaoke_favorite_count(key).await?;
        Ok(KaraokeFavoriteCount { karaoke, count })
    }
}
