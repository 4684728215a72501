//! Merging a listener's favorites into counted content rows.

use std::collections::HashSet;

use vtlist_model::{Favorite, KaraokeId, TransmitKaraoke, TransmitMovie};

/// Set `is_fav` on every movie row: true iff one of `favorites` points at the
/// row's movie URL.
///
/// `favorites` is expected to belong to a single listener.
pub fn add_is_fav_to_movie_with_fav(
    movies: Vec<TransmitMovie>,
    favorites: &[Favorite],
) -> Vec<TransmitMovie> {
    let favorite_urls: HashSet<&str> =
        favorites.iter().map(|fav| fav.movie_url.as_str()).collect();

    movies
        .into_iter()
        .map(|mut row| {
            row.is_fav =
                Some(favorite_urls.contains(row.movie.movie_url.as_str()));
            row
        })
        .collect()
}

/// Set `is_fav` on every karaoke row: true iff one of `favorites` matches the
/// row's `(movie_url, karaoke_id)` pair.
pub fn add_is_fav_to_karaoke_with_fav(
    karaokes: Vec<TransmitKaraoke>,
    favorites: &[Favorite],
) -> Vec<TransmitKaraoke> {
    let favorite_keys: HashSet<(&str, KaraokeId)> = favorites
        .iter()
        .filter(|fav| !fav.karaoke_id.is_none())
        .map(|fav| (fav.movie_url.as_str(), fav.karaoke_id))
        .collect();

    karaokes
        .into_iter()
        .map(|mut row| {
            let key = (row.karaoke.movie_url.as_str(), row.karaoke.karaoke_id);
            row.is_fav = Some(favorite_keys.contains(&key));
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtlist_model::{Karaoke, ListenerId, Movie, Vtuber, VtuberId};

    fn movie_row(url: &str, count: i64) -> TransmitMovie {
        TransmitMovie {
            vtuber: Vtuber {
                vtuber_id: VtuberId(1),
                vtuber_name: "Suisei".into(),
                vtuber_kana: "suisei".into(),
                ..Default::default()
            },
            movie: Movie {
                movie_url: url.into(),
                movie_title: url.into(),
                vtuber_id: VtuberId(1),
                movie_inputter_id: None,
            },
            count,
            is_fav: None,
        }
    }

    fn karaoke_row(url: &str, id: i32) -> TransmitKaraoke {
        let base = movie_row(url, 0);
        TransmitKaraoke {
            vtuber: base.vtuber,
            movie: base.movie,
            karaoke: Karaoke {
                karaoke_id: KaraokeId(id),
                movie_url: url.into(),
                sing_start: "00:10:00".into(),
                song_name: "Stellar Stellar".into(),
                karaoke_inputter_id: None,
            },
            count: 0,
            is_fav: None,
        }
    }

    fn fav(url: &str, karaoke: i32) -> Favorite {
        Favorite {
            id: 1,
            listener_id: ListenerId(5),
            movie_url: url.into(),
            karaoke_id: KaraokeId(karaoke),
        }
    }

    #[test]
    fn movie_flag_tracks_url_membership() {
        let rows = vec![movie_row("abc", 2), movie_row("def", 0)];
        let merged = add_is_fav_to_movie_with_fav(rows, &[fav("abc", 0)]);

        assert_eq!(merged[0].is_fav, Some(true));
        assert_eq!(merged[1].is_fav, Some(false));
        assert_eq!(merged[0].count, 2);
    }

    #[test]
    fn empty_favorites_mark_everything_false() {
        let merged =
            add_is_fav_to_movie_with_fav(vec![movie_row("abc", 1)], &[]);
        assert_eq!(merged[0].is_fav, Some(false));
    }

    #[test]
    fn karaoke_flag_needs_matching_pair() {
        let rows = vec![
            karaoke_row("abc", 1),
            karaoke_row("abc", 2),
            karaoke_row("def", 1),
        ];
        let merged = add_is_fav_to_karaoke_with_fav(
            rows,
            &[fav("abc", 2), fav("def", 0)],
        );

        let flags: Vec<_> = merged.iter().map(|row| row.is_fav).collect();
        assert_eq!(flags, vec![Some(false), Some(true), Some(false)]);
    }
}
