//! In-memory port implementations for interactor tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use vtlist_model::{
    ContentRecord, Favorite, FavoriteKey, Follow, FollowTarget, Karaoke,
    KaraokeId, Listener, ListenerId, Movie, TransmitKaraoke, TransmitMovie,
    Vtuber, VtuberId, VtuberMovie, VtuberMovieKaraoke,
};

use super::unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
use crate::database::ports::{
    catalog::CatalogRepository,
    content::ContentRepository,
    favorites::FavoriteRepository,
    follows::FollowRepository,
    listeners::{ListenerCredentials, ListenerRepository},
};
use crate::error::{CatalogError, Result};

#[derive(Debug, Default)]
pub(crate) struct State {
    pub vtubers: Vec<Vtuber>,
    pub movies: Vec<Movie>,
    pub karaokes: Vec<Karaoke>,
    pub favorites: Vec<Favorite>,
    pub follows: Vec<Follow>,
    pub listeners: Vec<ListenerCredentials>,
    pub next_id: i32,
    pub fail_vtubers: bool,
    pub fail_listener_favorites: bool,
    pub writes: usize,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn into_unit_of_work(self) -> (Arc<MemoryStore>, AppUnitOfWork) {
        let store = Arc::new(self);
        let uow = AppUnitOfWorkBuilder::new()
            .with_vtubers(store.clone())
            .with_movies(store.clone())
            .with_karaokes(store.clone())
            .with_catalog(store.clone())
            .with_favorites(store.clone())
            .with_follows(store.clone())
            .with_listeners(store.clone())
            .build()
            .unwrap();
        (store, uow)
    }

    /// VTuber 1 (inputter 7) with movie "abc" (inputter 7) and karaoke 10
    /// inside it (inputter 7).
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut state = store.state();
            state.next_id = 100;
            state.listeners.extend([3, 5, 7].map(|id| ListenerCredentials {
                listener: Listener {
                    listener_id: ListenerId(id),
                    listener_name: format!("listener{id}"),
                },
                password_hash: String::new(),
            }));
            state.vtubers.push(Vtuber {
                vtuber_id: VtuberId(1),
                vtuber_name: "Hoshimachi".into(),
                vtuber_kana: "hoshimachi".into(),
                intro_movie_url: None,
                vtuber_inputter_id: Some(ListenerId(7)),
            });
            state.movies.push(Movie {
                movie_url: "abc".into(),
                movie_title: "utawaku".into(),
                vtuber_id: VtuberId(1),
                movie_inputter_id: Some(ListenerId(7)),
            });
            state.karaokes.push(Karaoke {
                karaoke_id: KaraokeId(10),
                movie_url: "abc".into(),
                sing_start: "00:12:34".into(),
                song_name: "Stellar Stellar".into(),
                karaoke_inputter_id: Some(ListenerId(7)),
            });
        }
        store
    }
}

pub(crate) trait Stored: ContentRecord {
    fn table(state: &mut State) -> &mut Vec<Self>;

    fn assign_key(&mut self, id: i32);

    /// Copy the mutable columns, leaving key and inputter alone.
    fn apply(&mut self, from: &Self);

    /// Drop whatever referenced `removed`.
    fn cascade(_state: &mut State, _removed: &Self) {}
}

impl Stored for Vtuber {
    fn table(state: &mut State) -> &mut Vec<Self> {
        &mut state.vtubers
    }
    fn assign_key(&mut self, id: i32) {
        self.vtuber_id = VtuberId(id);
    }
    fn apply(&mut self, from: &Self) {
        self.vtuber_name = from.vtuber_name.clone();
        self.vtuber_kana = from.vtuber_kana.clone();
        self.intro_movie_url = from.intro_movie_url.clone();
    }
}

impl Stored for Movie {
    fn table(state: &mut State) -> &mut Vec<Self> {
        &mut state.movies
    }
    fn assign_key(&mut self, _id: i32) {}
    fn apply(&mut self, from: &Self) {
        self.movie_title = from.movie_title.clone();
        self.vtuber_id = from.vtuber_id;
    }
    fn cascade(state: &mut State, removed: &Self) {
        state.favorites.retain(|f| f.movie_url != removed.movie_url);
    }
}

impl Stored for Karaoke {
    fn table(state: &mut State) -> &mut Vec<Self> {
        &mut state.karaokes
    }
    fn assign_key(&mut self, id: i32) {
        self.karaoke_id = KaraokeId(id);
    }
    fn apply(&mut self, from: &Self) {
        self.sing_start = from.sing_start.clone();
        self.song_name = from.song_name.clone();
    }
    fn cascade(state: &mut State, removed: &Self) {
        state.favorites.retain(|f| {
            !(f.movie_url == removed.movie_url && f.karaoke_id == removed.karaoke_id)
        });
    }
}

#[async_trait]
impl<E> ContentRepository<E> for MemoryStore
where
    E: Stored,
    E::Key: PartialEq,
{
    async fn create(&self, record: &E) -> Result<E> {
        let mut state = self.state();
        let id = state.next_id();
        let mut created = record.clone();
        created.assign_key(id);
        let table = E::table(&mut state);
        if table.iter().any(|row| row.key() == created.key()) {
            return Err(CatalogError::Conflict(format!("{} {}", E::KIND, created.key())));
        }
        table.push(created.clone());
        state.writes += 1;
        Ok(created)
    }

    async fn update(&self, record: &E) -> Result<()> {
        let mut state = self.state();
        let row = E::table(&mut state)
            .iter_mut()
            .find(|row| row.key() == record.key())
            .ok_or_else(|| CatalogError::NotFound(record.key().to_string()))?;
        row.apply(record);
        state.writes += 1;
        Ok(())
    }

    async fn delete(&self, key: &E::Key) -> Result<()> {
        let mut state = self.state();
        let table = E::table(&mut state);
        let position = table
            .iter()
            .position(|row| &row.key() == key)
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))?;
        let removed = table.remove(position);
        E::cascade(&mut state, &removed);
        state.writes += 1;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        let mut state = self.state();
        if state.fail_vtubers && E::KIND == Vtuber::KIND {
            return Err(CatalogError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(E::table(&mut state).clone())
    }

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>> {
        let mut state = self.state();
        Ok(E::table(&mut state)
            .iter()
            .find(|row| &row.key() == key)
            .cloned())
    }
}

fn vtuber_of(state: &State, movie: &Movie) -> Option<Vtuber> {
    state
        .vtubers
        .iter()
        .find(|v| v.vtuber_id == movie.vtuber_id)
        .cloned()
}

fn movie_of(state: &State, karaoke: &Karaoke) -> Option<Movie> {
    state
        .movies
        .iter()
        .find(|m| m.movie_url == karaoke.movie_url)
        .cloned()
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn vtubers_movies(&self) -> Result<Vec<VtuberMovie>> {
        let state = self.state();
        Ok(state
            .movies
            .iter()
            .filter_map(|movie| {
                Some(VtuberMovie {
                    vtuber: vtuber_of(&state, movie)?,
                    movie: movie.clone(),
                })
            })
            .collect())
    }

    async fn vtubers_movies_karaokes(&self) -> Result<Vec<VtuberMovieKaraoke>> {
        let state = self.state();
        Ok(state
            .karaokes
            .iter()
            .filter_map(|karaoke| {
                let movie = movie_of(&state, karaoke)?;
                Some(VtuberMovieKaraoke {
                    vtuber: vtuber_of(&state, &movie)?,
                    movie,
                    karaoke: karaoke.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn movies_with_fav_counts(&self) -> Result<Vec<TransmitMovie>> {
        let state = self.state();
        Ok(state
            .movies
            .iter()
            .filter_map(|movie| {
                let count = state
                    .favorites
                    .iter()
                    .filter(|f| f.movie_url == movie.movie_url)
                    .count() as i64;
                Some(TransmitMovie {
                    vtuber: vtuber_of(&state, movie)?,
                    movie: movie.clone(),
                    count,
                    is_fav: None,
                })
            })
            .collect())
    }

    async fn karaokes_with_fav_counts(&self) -> Result<Vec<TransmitKaraoke>> {
        let state = self.state();
        Ok(state
            .karaokes
            .iter()
            .filter_map(|karaoke| {
                let movie = movie_of(&state, karaoke)?;
                let count = state
                    .favorites
                    .iter()
                    .filter(|f| {
                        f.movie_url == karaoke.movie_url
                            && f.karaoke_id == karaoke.karaoke_id
                    })
                    .count() as i64;
                Some(TransmitKaraoke {
                    vtuber: vtuber_of(&state, &movie)?,
                    movie,
                    karaoke: karaoke.clone(),
                    count,
                    is_fav: None,
                })
            })
            .collect())
    }

    async fn favorites_of_listener(
        &self,
        listener: ListenerId,
    ) -> Result<Vec<Favorite>> {
        let state = self.state();
        if state.fail_listener_favorites {
            return Err(CatalogError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(state
            .favorites
            .iter()
            .filter(|f| f.listener_id == listener)
            .cloned()
            .collect())
    }

    async fn movie_favorite_count(&self, movie_url: &str) -> Result<i64> {
        let state = self.state();
        Ok(state
            .favorites
            .iter()
            .filter(|f| f.movie_url == movie_url)
            .count() as i64)
    }

    async fn karaoke_favorite_count(&self, key: &FavoriteKey) -> Result<i64> {
        let state = self.state();
        Ok(state.favorites.iter().filter(|f| &f.key() == key).count() as i64)
    }

    async fn create_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<Favorite> {
        let mut state = self.state();
        if state
            .favorites
            .iter()
            .any(|f| f.listener_id == listener && &f.key() == key)
        {
            return Err(CatalogError::Conflict(format!("favorite on {}", key.movie_url)));
        }
        let favorite = Favorite {
            id: i64::from(state.next_id()),
            listener_id: listener,
            movie_url: key.movie_url.clone(),
            karaoke_id: key.karaoke_id,
        };
        state.favorites.push(favorite.clone());
        state.writes += 1;
        Ok(favorite)
    }

    async fn delete_favorite(
        &self,
        listener: ListenerId,
        key: &FavoriteKey,
    ) -> Result<()> {
        let mut state = self.state();
        let before = state.favorites.len();
        state
            .favorites
            .retain(|f| !(f.listener_id == listener && &f.key() == key));
        if state.favorites.len() == before {
            return Err(CatalogError::NotFound(format!("favorite on {}", key.movie_url)));
        }
        state.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn create_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<Follow> {
        let mut state = self.state();
        if state
            .follows
            .iter()
            .any(|f| f.follow_listener_id == follower && f.target() == target)
        {
            return Err(CatalogError::Conflict(format!("follow of {target:?}")));
        }
        let (followed_vtuber_id, followed_listener_id) = target.columns();
        let follow = Follow {
            id: i64::from(state.next_id()),
            follow_listener_id: follower,
            followed_vtuber_id,
            followed_listener_id,
        };
        state.follows.push(follow.clone());
        Ok(follow)
    }

    async fn delete_follow(
        &self,
        follower: ListenerId,
        target: FollowTarget,
    ) -> Result<()> {
        let mut state = self.state();
        let before = state.follows.len();
        state
            .follows
            .retain(|f| !(f.follow_listener_id == follower && f.target() == target));
        if state.follows.len() == before {
            return Err(CatalogError::NotFound(format!("follow of {target:?}")));
        }
        Ok(())
    }

    async fn follows_of_listener(&self, follower: ListenerId) -> Result<Vec<Follow>> {
        let state = self.state();
        Ok(state
            .follows
            .iter()
            .filter(|f| f.follow_listener_id == follower)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ListenerRepository for MemoryStore {
    async fn create_listener(
        &self,
        listener_name: &str,
        password_hash: &str,
    ) -> Result<Listener> {
        let mut state = self.state();
        if state
            .listeners
            .iter()
            .any(|c| c.listener.listener_name == listener_name)
        {
            return Err(CatalogError::Conflict(format!("listener {listener_name}")));
        }
        let listener = Listener {
            listener_id: ListenerId(state.next_id()),
            listener_name: listener_name.to_string(),
        };
        state.listeners.push(ListenerCredentials {
            listener: listener.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(listener)
    }

    async fn find_credentials_by_name(
        &self,
        listener_name: &str,
    ) -> Result<Option<ListenerCredentials>> {
        let state = self.state();
        Ok(state
            .listeners
            .iter()
            .find(|c| c.listener.listener_name == listener_name)
            .cloned())
    }

    async fn find_by_id(&self, id: ListenerId) -> Result<Option<Listener>> {
        let state = self.state();
        Ok(state
            .listeners
            .iter()
            .find(|c| c.listener.listener_id == id)
            .map(|c| c.listener.clone()))
    }
}
