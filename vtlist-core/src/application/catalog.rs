use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use vtlist_model::{Karaoke, Movie, Vtuber, VtuberMovie, VtuberMovieKaraoke};

use crate::database::ports::{catalog::CatalogRepository, content::ContentRepository};
use crate::domain::partial::{Partial, WarningLog};
use crate::error::Result;

/// Every live record of each kind, as listed on the contents page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Contents {
    pub vtubers: Vec<Vtuber>,
    pub movies: Vec<Movie>,
    pub karaokes: Vec<Karaoke>,
}

#[derive(Clone)]
pub struct CatalogInteractor {
    catalog: Arc<dyn CatalogRepository>,
    vtubers: Arc<dyn ContentRepository<Vtuber>>,
    movies: Arc<dyn ContentRepository<Movie>>,
    karaokes: Arc<dyn ContentRepository<Karaoke>>,
}

impl fmt::Debug for CatalogInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogInteractor")
            .field("catalog_repo", &Arc::strong_count(&self.catalog))
            .finish_non_exhaustive()
    }
}

impl CatalogInteractor {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        vtubers: Arc<dyn ContentRepository<Vtuber>>,
        movies: Arc<dyn ContentRepository<Movie>>,
        karaokes: Arc<dyn ContentRepository<Karaoke>>,
    ) -> Self {
        Self {
            catalog,
            vtubers,
            movies,
            karaokes,
        }
    }

    pub async fn get_all_vtubers_movies(&self) -> Result<Vec<VtuberMovie>> {
        self.catalog.vtubers_movies().await
    }

    /// The three-way VTuber/movie/karaoke join. Failures propagate; callers
    /// treat this read as all-or-nothing.
    pub async fn get_essential_join(&self) -> Result<Vec<VtuberMovieKaraoke>> {
        self.catalog.vtubers_movies_karaokes().await
    }

    /// Best effort: a failing table leaves its list empty and adds a warning.
    pub async fn contents(&self) -> Partial<Contents> {
        let mut log = WarningLog::new();
        let vtubers = log.take("vtubers", self.vtubers.find_all().await);
        let movies = log.take("movies", self.movies.find_all().await);
        let karaokes = log.take("karaokes", self.karaokes.find_all().await);
        log.finish(Contents {
            vtubers,
            movies,
            karaokes,
        })
    }
}
