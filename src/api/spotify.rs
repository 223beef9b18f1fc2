use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::Result, server::AppState, types::NowPlayingResponse, warning};

pub const NOW_PLAYING_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=30";
pub const TOP_ITEMS_CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=43200";

/// `GET /api/spotify/now-playing`
///
/// Never fails because of the provider: any upstream failure, including the
/// token exchange, is answered with the idle sentinel. Only the active
/// response carries a caching directive.
pub async fn now_playing(State(state): State<Arc<AppState>>) -> Response {
    match state.spotify.now_playing().await {
        Ok(active @ NowPlayingResponse::Active { .. }) => {
            ([(header::CACHE_CONTROL, NOW_PLAYING_CACHE_CONTROL)], Json(active)).into_response()
        }
        Ok(idle) => Json(idle).into_response(),
        Err(e) if e.is_upstream_unavailable() => {
            warning!("Now playing unavailable: {}", e);
            Json(NowPlayingResponse::idle()).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /api/spotify/top-tracks`
///
/// Upstream failures are passed through to the caller as-is.
pub async fn top_tracks(State(state): State<Arc<AppState>>) -> Result<Response> {
    let tracks = state.spotify.top_tracks().await?;
    Ok(([(header::CACHE_CONTROL, TOP_ITEMS_CACHE_CONTROL)], Json(tracks)).into_response())
}

/// `GET /api/spotify/top-artists`
pub async fn top_artists(State(state): State<Arc<AppState>>) -> Result<Response> {
    let artists = state.spotify.top_artists().await?;
    Ok(([(header::CACHE_CONTROL, TOP_ITEMS_CACHE_CONTROL)], Json(artists)).into_response())
}
