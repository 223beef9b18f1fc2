use crate::{
    error::Result,
    projection,
    spotify::SpotifyClient,
    types::{Profile, UserProfile},
    utils::ensure_success,
};

pub const PROFILE_PATH: &str = "/me";

impl SpotifyClient {
    pub async fn profile(&self) -> Result<Profile> {
        let res = ensure_success(self.get(PROFILE_PATH).await?).await?;
        let bytes = res.bytes().await?;
        let user: UserProfile = serde_json::from_slice(&bytes)?;

        projection::profile(&user)
    }
}
