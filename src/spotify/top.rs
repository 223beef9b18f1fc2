use crate::{
    error::Result,
    projection,
    spotify::SpotifyClient,
    types::{TopArtists, TopArtistsResponse, TopTracks, TopTracksResponse},
    utils::ensure_success,
};

pub const TOP_TRACKS_PATH: &str = "/me/top/tracks";

/// The lookback window is fixed to the provider's "short_term" range.
pub const TOP_ARTISTS_PATH: &str = "/me/top/artists?time_range=short_term";

impl SpotifyClient {
    /// Fetches the first page of top tracks, unprojected.
    pub async fn top_tracks_raw(&self) -> Result<TopTracksResponse> {
        let res = ensure_success(self.get(TOP_TRACKS_PATH).await?).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetches the first page of short-term top artists, unprojected.
    pub async fn top_artists_raw(&self) -> Result<TopArtistsResponse> {
        let res = ensure_success(self.get(TOP_ARTISTS_PATH).await?).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Top tracks, trimmed to the first ten in provider order.
    pub async fn top_tracks(&self) -> Result<TopTracks> {
        projection::top_tracks(&self.top_tracks_raw().await?)
    }

    /// Top artists, trimmed to the first ten in provider order.
    pub async fn top_artists(&self) -> Result<TopArtists> {
        projection::top_artists(&self.top_artists_raw().await?)
    }
}
