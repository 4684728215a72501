use async_trait::async_trait;
use vtlist_model::{VtuberMovie, VtuberMovieKaraoke};

use crate::error::Result;

/// Join reads across the catalogue, without favorite data.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn vtubers_movies(&self) -> Result<Vec<VtuberMovie>>;

    async fn vtubers_movies_karaokes(&self) -> Result<Vec<VtuberMovieKaraoke>>;
}
