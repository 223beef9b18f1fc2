use crate::{error::Result, projection, spotify::SpotifyClient, types::NowPlayingResponse};

pub const NOW_PLAYING_PATH: &str = "/me/player/currently-playing";

impl SpotifyClient {
    /// Returns what the owner is listening to right now.
    ///
    /// A 204 (no active session) or any error status from the player
    /// endpoint is not an error: it projects to the idle sentinel
    /// `{"isPlaying":false}`. Failures of the token exchange or of the
    /// transport are still returned as errors so the caller decides.
    pub async fn now_playing(&self) -> Result<NowPlayingResponse> {
        let res = self.get(NOW_PLAYING_PATH).await?;
        let status = res.status();
        let body = res.bytes().await?;

        projection::now_playing(status, &body)
    }
}
