//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::catalog::PostgresCatalogRepository;
pub use repositories::favorites::PostgresFavoriteRepository;
pub use repositories::follows::PostgresFollowRepository;
pub use repositories::karaokes::PostgresKaraokeRepository;
pub use repositories::listeners::PostgresListenerRepository;
pub use repositories::movies::PostgresMovieRepository;
pub use repositories::vtubers::PostgresVtuberRepository;
