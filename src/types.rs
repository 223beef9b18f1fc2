use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Upstream shapes. Only the fields that are projected or useful for
// debugging are modelled; everything else in the payload is ignored.

/// Body of the token endpoint, for both the refresh-token and the
/// authorization-code grant.
///
/// `refresh_token` is only present when the provider issues or rotates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
    pub refresh_token: Option<String>,
}

/// Artwork reference. The provider lists the largest size first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Artist object. Simplified artists nested in tracks carry no `images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    /// Keyed by platform; the `spotify` entry is the public web link.
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

/// Track object as found in top-tracks pages and the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

/// A page of results. Only the first page is ever requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    pub next: Option<String>,
}

pub type TopTracksResponse = Paging<Track>;
pub type TopArtistsResponse = Paging<Artist>;

/// Body of `/me/player/currently-playing` when the status is 200.
///
/// `item` is null for ads and while the session is between tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub currently_playing_type: String,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

/// Body of `/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

// Projected shapes served to the UI.

/// The track currently playing, as shown in the site footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub is_playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_image_url: String,
    pub song_url: String,
}

/// Body of `/api/spotify/now-playing`.
///
/// `Idle` serializes to exactly `{"isPlaying":false}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NowPlayingResponse {
    Active { status: NowPlaying },
    Idle {
        #[serde(rename = "isPlaying")]
        is_playing: bool,
    },
}

impl NowPlayingResponse {
    /// The sentinel served whenever nothing is playing or the provider
    /// cannot be reached.
    pub fn idle() -> Self {
        NowPlayingResponse::Idle { is_playing: false }
    }
}

/// One entry of `/api/spotify/top-tracks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTrack {
    /// Artist names joined with `", "`.
    pub artist: String,
    pub song_url: String,
    pub title: String,
    pub image: String,
    pub album: String,
}

/// One entry of `/api/spotify/top-artists`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopArtist {
    pub artist: String,
    pub image: String,
    pub link: String,
}

/// Body of `/api/spotify/top-tracks`, at most ten entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTracks {
    pub tracks: Vec<TopTrack>,
}

/// Body of `/api/spotify/top-artists`, at most ten entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopArtists {
    pub artists: Vec<TopArtist>,
}

/// The owner's profile as printed by the `profile` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub link: String,
    pub followers: u64,
    pub image: Option<String>,
}

/// `{"total": n}`, both on the wire to the counting service and from
/// `/api/views/{slug}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTotal {
    pub total: u64,
}

/// Row of the `top tracks` table.
#[derive(Tabled)]
pub struct TopTrackTableRow {
    pub rank: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct TopArtistTableRow {
    pub rank: usize,
    pub artist: String,
    pub link: String,
}

#[derive(Tabled)]
pub struct PostTableRow {
    pub date: String,
    pub slug: String,
    pub title: String,
    pub tags: String,
}

/// State shared between the `auth` command and its callback handler.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub state: String,
    pub token: Option<TokenResponse>,
}
