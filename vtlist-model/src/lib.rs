//! Core data model definitions shared across vtlist crates.
//!
//! Everything here is a passive record. Persistence lives in `vtlist-core`,
//! transport shaping in `vtlist-server`.

pub mod content;
pub mod ids;
pub mod listener;
pub mod projections;
pub mod relations;

pub use content::{ContentRecord, Karaoke, Movie, Vtuber};
pub use ids::{KaraokeId, ListenerId, VtuberId};
pub use listener::Listener;
pub use projections::{
    KaraokeFavoriteCount, MovieFavoriteCount, TransmitKaraoke, TransmitMovie,
    VtuberMovie, VtuberMovieKaraoke,
};
pub use relations::{Favorite, FavoriteKey, Follow, FollowTarget};
