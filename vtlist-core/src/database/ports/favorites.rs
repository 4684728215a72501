use async_trait::async_trait;
use vtlist_model::{
    Favorite, FavoriteKey, ListenerId, TransmitKaraoke, TransmitMovie,
};

use crate::domain::favorite::{
    add_is_fav_to_karaoke_with_fav, add_is_fav_to_movie_with_fav,
};
use crate::error::Result;

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Every live movie joined to its VTuber, with the number of live
    /// favorites referencing the movie URL. `is_fav` is left unset.
    async fn movies_with_fav_counts(&self) -> Result<Vec<TransmitMovie>>;

    /// Every live karaoke joined to its movie and VTuber, counted by
    /// `(movie_url, karaoke_id)`. `is_fav` is left unset.
    async fn karaokes_with_fav_counts(&self) -> Result<Vec<TransmitKaraoke>>;

    async fn favorites_of_listener(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<Favorite>>;

    async fn movie_favorite_count(&self, movie_url: &str) -> Result<i64>;

    async fn karaoke_favorite_count(&self, key: &FavoriteKey) -> Result<i64>;

    /// Fails with `CatalogError::Conflict` when the listener already has a
    /// live favorite on `key`.
    async fn create_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<Favorite>;

    async fn delete_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<()>;

    /// Counted movies with `is_fav` resolved for `listener`.
    ///
    /// The default runs the count query and the favorite query separately and
    /// merges them; backends that can answer in one statement should override
    /// it so count and flag come from the same snapshot.
    async fn movies_with_fav_status(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<TransmitMovie>> {
        let movies = self.movies_with_fav_counts().await?;
        let favorites = self.favorites_of_listener(listener).await?;
        Ok(add_is_fav_to_movie_with_fav(movies, &favorites))
    }

    async fn karaokes_with_fav_status(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<TransmitKaraoke>> {
        let karaokes = self.karaokes_with_fav_counts().await?;
        let favorites = self.favorites_of_listener(listener).await?;
        Ok(add_is_fav_to_karaoke_with_fav(karaokes, &favorites))
    }
}
