//! Read-only shapes assembled per response. None of these are persisted.
//!
//! Joined rows serialize flat: the columns of every joined record sit side by
//! side in one JSON object, and a column shared by two records (`vtuber_id`,
//! `movie_url`) appears once.

use crate::content::{Karaoke, Movie, Vtuber};

/// Vtuber ⋈ Movie row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VtuberMovie {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub vtuber: Vtuber,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movie: Movie,
}

/// Vtuber ⋈ Movie ⋈ Karaoke row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VtuberMovieKaraoke {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub vtuber: Vtuber,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movie: Movie,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub karaoke: Karaoke,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovieFavoriteCount {
    #[cfg_attr(feature = "serde", serde(flatten))]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movie: Movie,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct KaraokeFavoriteCount {
    #[cfg_attr(feature = "serde", serde(flatten))]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub karaoke: Karaoke,
    pub count: i64,
}

/// Movie as sent to clients: owning VTuber, live favorite count and, when the
/// requester is known, whether they favorited it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransmitMovie {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub vtuber: Vtuber,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movie: Movie,
    pub count: i64,
    pub is_fav: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransmitKaraoke {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub vtuber: Vtuber,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movie: Movie,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub karaoke: Karaoke,
    pub count: i64,
    pub is_fav: Option<bool>,
}

#[cfg(feature = "serde")]
mod wire {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::*;

    fn vtuber_fields<M: SerializeMap>(map: &mut M, vtuber: &Vtuber) -> Result<(), M::Error> {
        map.serialize_entry("vtuber_id", &vtuber.vtuber_id)?;
        map.serialize_entry("vtuber_name", &vtuber.vtuber_name)?;
        map.serialize_entry("vtuber_kana", &vtuber.vtuber_kana)?;
        map.serialize_entry("intro_movie_url", &vtuber.intro_movie_url)?;
        map.serialize_entry("vtuber_inputter_id", &vtuber.vtuber_inputter_id)
    }

    // vtuber_id comes from the vtuber side
    fn movie_fields<M: SerializeMap>(map: &mut M, movie: &Movie) -> Result<(), M::Error> {
        map.serialize_entry("movie_url", &movie.movie_url)?;
        map.serialize_entry("movie_title", &movie.movie_title)?;
        map.serialize_entry("movie_inputter_id", &movie.movie_inputter_id)
    }

    // movie_url comes from the movie side
    fn karaoke_fields<M: SerializeMap>(
        map: &mut M,
        karaoke: &Karaoke,
    ) -> Result<(), M::Error> {
        map.serialize_entry("karaoke_id", &karaoke.karaoke_id)?;
        map.serialize_entry("sing_start", &karaoke.sing_start)?;
        map.serialize_entry("song_name", &karaoke.song_name)?;
        map.serialize_entry("karaoke_inputter_id", &karaoke.karaoke_inputter_id)
    }

    fn favorite_fields<M: SerializeMap>(
        map: &mut M,
        count: i64,
        is_fav: Option<bool>,
    ) -> Result<(), M::Error> {
        map.serialize_entry("count", &count)?;
        if let Some(is_fav) = is_fav {
            map.serialize_entry("is_fav", &is_fav)?;
        }
        Ok(())
    }

    impl Serialize for VtuberMovie {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            vtuber_fields(&mut map, &self.vtuber)?;
            movie_fields(&mut map, &self.movie)?;
            map.end()
        }
    }

    impl Serialize for VtuberMovieKaraoke {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            vtuber_fields(&mut map, &self.vtuber)?;
            movie_fields(&mut map, &self.movie)?;
            karaoke_fields(&mut map, &self.karaoke)?;
            map.end()
        }
    }

    impl Serialize for TransmitMovie {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            vtuber_fields(&mut map, &self.vtuber)?;
            movie_fields(&mut map, &self.movie)?;
            favorite_fields(&mut map, self.count, self.is_fav)?;
            map.end()
        }
    }

    impl Serialize for TransmitKaraoke {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            vtuber_fields(&mut map, &self.vtuber)?;
            movie_fields(&mut map, &self.movie)?;
            karaoke_fields(&mut map, &self.karaoke)?;
            favorite_fields(&mut map, self.count, self.is_fav)?;
            map.end()
        }
    }
}
