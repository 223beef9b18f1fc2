//! Pure mapping from upstream Spotify payloads to the shapes the UI reads.
//!
//! Every function here is synchronous and side-effect free. A projected
//! record is always built from exactly one upstream item, and every field is
//! either copied or derived by a join or a first-element pick. Fields the
//! upstream omitted surface as [`ApiError::MissingField`] naming the path.

use std::collections::HashMap;

use reqwest::StatusCode;

use crate::{
    error::{ApiError, Result},
    types::{
        Artist, CurrentlyPlayingResponse, Image, NowPlaying, NowPlayingResponse, Profile,
        TopArtist, TopArtists, TopArtistsResponse, TopTrack, TopTracks, TopTracksResponse, Track,
        UserProfile,
    },
};

/// Maximum number of items served by the top-tracks and top-artists endpoints.
pub const TOP_ITEMS_LIMIT: usize = 10;

const ARTIST_SEPARATOR: &str = ", ";

/// Whether a currently-playing status code means "nothing to show".
///
/// 204 is how the provider signals that no session is active.
pub fn is_idle_status(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT || status.as_u16() >= 400
}

pub fn now_playing(status: StatusCode, body: &[u8]) -> Result<NowPlayingResponse> {
    if is_idle_status(status) {
        return Ok(NowPlayingResponse::idle());
    }

    let playing: CurrentlyPlayingResponse = serde_json::from_slice(body)?;
    now_playing_from(&playing)
}

pub fn now_playing_from(playing: &CurrentlyPlayingResponse) -> Result<NowPlayingResponse> {
    let Some(track) = playing.item.as_ref().filter(|_| playing.is_playing) else {
        return Ok(NowPlayingResponse::idle());
    };

    Ok(NowPlayingResponse::Active {
        status: NowPlaying {
            is_playing: true,
            title: track.name.clone(),
            artist: join_artists(&track.artists),
            album: track.album.name.clone(),
            album_image_url: first_image(&track.album.images, "item.album.images[0]")?,
            song_url: spotify_link(&track.external_urls, "item.external_urls.spotify")?,
        },
    })
}

pub fn top_tracks(page: &TopTracksResponse) -> Result<TopTracks> {
    let tracks = page
        .items
        .iter()
        .take(TOP_ITEMS_LIMIT)
        .map(top_track)
        .collect::<Result<Vec<_>>>()?;

    Ok(TopTracks { tracks })
}

pub fn top_track(track: &Track) -> Result<TopTrack> {
    Ok(TopTrack {
        artist: join_artists(&track.artists),
        song_url: spotify_link(&track.external_urls, "external_urls.spotify")?,
        title: track.name.clone(),
        image: first_image(&track.album.images, "album.images[0]")?,
        album: track.album.name.clone(),
    })
}

pub fn top_artists(page: &TopArtistsResponse) -> Result<TopArtists> {
    let artists = page
        .items
        .iter()
        .take(TOP_ITEMS_LIMIT)
        .map(top_artist)
        .collect::<Result<Vec<_>>>()?;

    Ok(TopArtists { artists })
}

pub fn top_artist(artist: &Artist) -> Result<TopArtist> {
    Ok(TopArtist {
        artist: artist.name.clone(),
        image: first_image(&artist.images, "images[0]")?,
        link: spotify_link(&artist.external_urls, "external_urls.spotify")?,
    })
}

pub fn profile(user: &UserProfile) -> Result<Profile> {
    Ok(Profile {
        name: user
            .display_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| user.id.clone()),
        link: spotify_link(&user.external_urls, "external_urls.spotify")?,
        followers: user.followers.as_ref().map_or(0, |f| f.total),
        image: user.images.first().map(|image| image.url.clone()),
    })
}

/// Joins artist names in provider order, e.g. `"A, B, C"`.
pub fn join_artists(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(ARTIST_SEPARATOR)
}

fn first_image(images: &[Image], path: &'static str) -> Result<String> {
    images
        .first()
        .map(|image| image.url.clone())
        .ok_or(ApiError::MissingField(path))
}

fn spotify_link(urls: &HashMap<String, String>, path: &'static str) -> Result<String> {
    urls.get("spotify")
        .cloned()
        .ok_or(ApiError::MissingField(path))
}
