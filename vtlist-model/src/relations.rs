//! Listener-to-content relations.

use crate::ids::{KaraokeId, ListenerId, VtuberId};

/// A listener's bookmark of a movie, or of one karaoke performance inside it.
///
/// Unique per `(listener_id, movie_url, karaoke_id)` among live rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: i64,
    pub listener_id: ListenerId,
    pub movie_url: String,
    pub karaoke_id: KaraokeId,
}

impl Favorite {
    pub fn key(&self) -> FavoriteKey {
        FavoriteKey {
            movie_url: self.movie_url.clone(),
            karaoke_id: self.karaoke_id,
        }
    }
}

/// Content key a favorite points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FavoriteKey {
    pub movie_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub karaoke_id: KaraokeId,
}

impl FavoriteKey {
    pub fn movie(movie_url: impl Into<String>) -> Self {
        Self {
            movie_url: movie_url.into(),
            karaoke_id: KaraokeId::NONE,
        }
    }

    pub fn karaoke(movie_url: impl Into<String>, karaoke_id: KaraokeId) -> Self {
        Self {
            movie_url: movie_url.into(),
            karaoke_id,
        }
    }
}

/// A listener following a VTuber or another listener. Unused target columns
/// hold 0 so the uniqueness triple stays non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Follow {
    pub id: i64,
    pub follow_listener_id: ListenerId,
    pub followed_vtuber_id: VtuberId,
    pub followed_listener_id: ListenerId,
}

impl Follow {
    pub fn target(&self) -> FollowTarget {
        if self.followed_vtuber_id.get() != 0 {
            FollowTarget::Vtuber(self.followed_vtuber_id)
        } else {
            FollowTarget::Listener(self.followed_listener_id)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FollowTarget {
    Vtuber(VtuberId),
    Listener(ListenerId),
}

impl FollowTarget {
    /// Column values `(followed_vtuber_id, followed_listener_id)`.
    pub fn columns(self) -> (VtuberId, ListenerId) {
        match self {
            FollowTarget::Vtuber(id) => (id, ListenerId(0)),
            FollowTarget::Listener(id) => (VtuberId(0), id),
        }
    }
}
