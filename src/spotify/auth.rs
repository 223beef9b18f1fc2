use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::{Client, header};

use crate::{
    config::AuthSetup,
    error::Result,
    spotify::SpotifyClient,
    types::TokenResponse,
    utils::ensure_success,
};

/// A short-lived bearer token, good for the one call that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    /// The provider may rotate the refresh token. It is surfaced here but
    /// never persisted: every exchange starts from the configured one.
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

impl From<TokenResponse> for AccessToken {
    fn from(res: TokenResponse) -> Self {
        AccessToken {
            access_token: res.access_token,
            refresh_token: res.refresh_token,
            expires_in: res.expires_in,
        }
    }
}

impl SpotifyClient {
    /// Exchanges the configured refresh token for a fresh access token.
    ///
    /// Sends one form-encoded `POST` to the token endpoint using the
    /// `refresh_token` grant, authenticated with HTTP Basic credentials built
    /// from the client id and secret.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`](crate::error::ApiError::Http) on transport failure
    /// - [`ApiError::Upstream`](crate::error::ApiError::Upstream) when the
    ///   token endpoint answers with a non-success status, carrying that
    ///   status and body unmodified
    /// - [`ApiError::Decode`](crate::error::ApiError::Decode) when the body
    ///   is not a token response
    ///
    /// Nothing is retried.
    pub async fn access_token(&self) -> Result<AccessToken> {
        let credentials = &self.config.credentials;

        let res = self
            .http
            .post(&self.config.token_url)
            .header(
                header::AUTHORIZATION,
                basic_authorization(&credentials.client_id, &credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let bytes = ensure_success(res).await?.bytes().await?;
        let token: TokenResponse = serde_json::from_slice(&bytes)?;

        Ok(token.into())
    }
}

/// Builds the `Authorization` header value for the token endpoint.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Random value for the `state` parameter of the authorization request.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the URL the site owner opens to grant the dashboard's scopes.
pub fn authorize_url(setup: &AuthSetup, state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&state={state}&scope={scope}",
        auth_url = setup.auth_url,
        client_id = setup.client_id,
        redirect_uri = urlencoding::encode(&setup.redirect_uri),
        state = state,
        scope = urlencoding::encode(&setup.scope),
    )
}

/// Exchanges an authorization code for a token pair.
///
/// Only used by the `auth` command to obtain the long-lived refresh token
/// that the server is then configured with.
pub async fn exchange_code(http: &Client, setup: &AuthSetup, code: &str) -> Result<TokenResponse> {
    let res = http
        .post(&setup.token_url)
        .header(
            header::AUTHORIZATION,
            basic_authorization(&setup.client_id, &setup.client_secret),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", setup.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let bytes = ensure_success(res).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
