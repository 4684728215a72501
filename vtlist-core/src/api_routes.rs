/// Version 1 route table, relative to the `/api/v1` mount point.
pub mod v1 {
    pub const PREFIX: &str = "/api/v1";

    pub const TOP_PAGE: &str = "/toppage";
    pub const CONTENTS: &str = "/contents";
    pub const VTUBERS_MOVIES: &str = "/vtubers-movies";
    pub const ESSENTIAL_JOIN: &str = "/vtubers-movies-karaokes";

    pub const VTUBER: &str = "/vtuber";
    pub const MOVIE: &str = "/movie";
    pub const KARAOKE: &str = "/karaoke";

    pub const FAVORITES: &str = "/favorites";
    pub const FAVORITE_MOVIE: &str = "/favorite/movie";
    pub const FAVORITE_KARAOKE: &str = "/favorite/karaoke";

    pub const FOLLOW: &str = "/follow";

    pub const SIGN_UP: &str = "/signup";
    pub const LOG_IN: &str = "/login";
    pub const LOG_OUT: &str = "/logout";

    /// Absolute path for a relative route, for clients and tests.
    pub fn path(route: &str) -> String {
        format!("{PREFIX}{route}")
    }
}
