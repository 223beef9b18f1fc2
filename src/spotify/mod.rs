//! # Spotify Integration Module
//!
//! This module is the thin client JS Garden uses to read the site owner's
//! listening data from the Spotify Web API. Every public operation performs
//! exactly two sequential requests: a refresh-token exchange, then one
//! authenticated `GET` against a fixed resource endpoint.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers / CLI
//!          ↓
//! SpotifyClient
//!     ├── Authentication (refresh-token grant, auth-code setup helper)
//!     ├── Player (currently playing)
//!     ├── Top items (tracks, artists - short term)
//!     └── Profile (current user)
//!          ↓
//! Projection (pure reshaping)
//! ```
//!
//! ## Token Strategy
//!
//! No token is cached. Each call requests a fresh access token from the
//! configured refresh token, and the rotated refresh token the provider may
//! hand back is never written anywhere. This costs one extra round trip per
//! call and leaves concurrent callers uncoordinated against the provider's
//! rate limits.
//!
//! ## Error Handling
//!
//! There is no retry, no backoff and no timeout beyond the `reqwest`
//! defaults. Non-success statuses become [`ApiError::Upstream`](crate::error::ApiError::Upstream) carrying
//! the provider's status and body so handlers can pass them through.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - refresh-token and authorization-code grants
//! - `GET /me/player/currently-playing`
//! - `GET /me/top/tracks`
//! - `GET /me/top/artists?time_range=short_term`
//! - `GET /me`

pub mod auth;
pub mod player;
pub mod profile;
pub mod top;

use reqwest::{Client, Response};

use crate::{config::SpotifyConfig, error::Result};

/// Client for the resource endpoints, built once from the process config.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(http: Client, config: SpotifyConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Exchanges the refresh token, then issues one `GET` to `path`.
    ///
    /// The response is returned as-is, whatever its status.
    async fn get(&self, path: &str) -> Result<Response> {
        let token = self.access_token().await?;

        let url = format!("{base}{path}", base = self.config.api_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        Ok(response)
    }
}
