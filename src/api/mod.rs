//! # API Module
//!
//! HTTP handlers for the JS Garden server, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Spotify dashboard data
//!
//! - [`now_playing`] - `GET /api/spotify/now-playing`, falls back to
//!   `{"isPlaying":false}` whenever the provider has nothing to report
//! - [`top_tracks`] - `GET /api/spotify/top-tracks`, at most ten tracks
//! - [`top_artists`] - `GET /api/spotify/top-artists`, at most ten artists
//!
//! Each call exchanges the refresh token, makes a single upstream request and
//! answers with a `Cache-Control` directive so a CDN can absorb repeat traffic.
//!
//! ### View counter
//!
//! - [`get_views`] - `GET /api/views/{slug}`
//! - [`register_view`] - `POST /api/views/{slug}`
//!
//! ### Pages
//!
//! - [`blog_index`] - `GET /` and `GET /blog`
//! - [`blog_post`] - `GET /blog/{slug}`
//! - [`spotify_dashboard`] - `GET /spotify`
//! - [`sitemap`] - `GET /sitemap.xml`
//!
//! ### Setup and monitoring
//!
//! - [`callback`] - OAuth redirect target used by the `auth` command only
//! - [`health`] - status and version for load balancers
//!
//! ## Related Modules
//!
//! - [`crate::server`] - router wiring and [`AppState`](crate::server::AppState)
//! - [`crate::spotify`] - upstream client
//! - [`crate::views`] - view count backends

mod callback;
mod health;
mod pages;
mod spotify;
mod views;

pub use callback::callback;
pub use health::health;
pub use pages::{blog_index, blog_post, not_found, sitemap, spotify_dashboard};
pub use spotify::{
    NOW_PLAYING_CACHE_CONTROL, TOP_ITEMS_CACHE_CONTROL, now_playing, top_artists, top_tracks,
};
pub use views::{get_views, register_view};
