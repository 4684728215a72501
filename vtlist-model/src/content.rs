//! Catalogue records created by listeners.

use std::fmt;

use crate::ids::{KaraokeId, ListenerId, VtuberId};

/// Shared shape of every listener-entered catalogue record.
///
/// The inputter is the listener that created the record; it is the only
/// identity allowed to modify or delete it afterwards.
pub trait ContentRecord: Clone + fmt::Debug + Send + Sync + 'static {
    type Key: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Human readable kind, used in log fields and error messages.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    fn inputter(&self) -> Option<ListenerId>;

    fn stamp_inputter(&mut self, inputter: ListenerId);

    /// Whether writing `self` over `stored` would move the record under a
    /// different parent. Favorites are keyed through the parent, so such edits
    /// are refused.
    fn changes_parent(&self, _stored: &Self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vtuber {
    #[cfg_attr(feature = "serde", serde(default))]
    pub vtuber_id: VtuberId,
    pub vtuber_name: String,
    pub vtuber_kana: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub intro_movie_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vtuber_inputter_id: Option<ListenerId>,
}

impl ContentRecord for Vtuber {
    type Key = VtuberId;
    const KIND: &'static str = "vtuber";

    fn key(&self) -> VtuberId {
        self.vtuber_id
    }

    fn inputter(&self) -> Option<ListenerId> {
        self.vtuber_inputter_id
    }

    fn stamp_inputter(&mut self, inputter: ListenerId) {
        self.vtuber_inputter_id = Some(inputter);
    }
}

/// A video on a VTuber's channel, keyed by its URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Movie {
    pub movie_url: String,
    pub movie_title: String,
    pub vtuber_id: VtuberId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movie_inputter_id: Option<ListenerId>,
}

impl ContentRecord for Movie {
    type Key = String;
    const KIND: &'static str = "movie";

    fn key(&self) -> String {
        self.movie_url.clone()
    }

    fn inputter(&self) -> Option<ListenerId> {
        self.movie_inputter_id
    }

    fn stamp_inputter(&mut self, inputter: ListenerId) {
        self.movie_inputter_id = Some(inputter);
    }
}

/// A single sung song inside a movie. `sing_start` is the `HH:MM:SS` offset
/// at which the performance begins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Karaoke {
    #[cfg_attr(feature = "serde", serde(default))]
    pub karaoke_id: KaraokeId,
    pub movie_url: String,
    pub sing_start: String,
    pub song_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub karaoke_inputter_id: Option<ListenerId>,
}

impl ContentRecord for Karaoke {
    type Key = KaraokeId;
    const KIND: &'static str = "karaoke";

    fn key(&self) -> KaraokeId {
        self.karaoke_id
    }

    fn inputter(&self) -> Option<ListenerId> {
        self.karaoke_inputter_id
    }

    fn stamp_inputter(&mut self, inputter: ListenerId) {
        self.karaoke_inputter_id = Some(inputter);
    }

    fn changes_parent(&self, stored: &Self) -> bool {
        self.movie_url != stored.movie_url
    }
}
