//! Configuration management for the JS Garden server.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files, and turns them into an immutable [`Config`]
//! that is built once at process start and shared by every request handler.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_SITE_URL: &str = "https://jsgarden.co";
pub const DEFAULT_CONTENT_DIR: &str = "_posts";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "user-read-currently-playing user-top-read";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the working directory first and then in the
/// platform-specific local data directory under `jsgarden/.env`. Values that
/// are already present in the environment are never overwritten, so the
/// first source to define a variable wins.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/jsgarden/.env`
/// - macOS: `~/Library/Application Support/jsgarden/.env`
/// - Windows: `%LOCALAPPDATA%/jsgarden/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed. Missing files are not an error.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the application's local data directory (`<data_local_dir>/jsgarden`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jsgarden");
    path
}

/// The long-lived credential set used for every token exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Everything the Spotify client needs: credentials and endpoint bases.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyConfig {
    pub credentials: SpotifyCredentials,
    pub api_url: String,
    pub token_url: String,
}

/// Process-wide configuration, loaded once and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub site_url: String,
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub views_api_url: Option<String>,
    pub spotify: SpotifyConfig,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// All missing required variables are reported at once rather than one
    /// at a time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);
        let mut missing = Vec::new();

        let client_id = vars.required("SPOTIFY_CLIENT_ID", &mut missing);
        let client_secret = vars.required("SPOTIFY_CLIENT_SECRET", &mut missing);
        let refresh_token = vars.required("SPOTIFY_REFRESH_TOKEN", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Config {
            server_addr: vars.socket_addr("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)?,
            site_url: trim_slash(vars.or("SITE_URL", DEFAULT_SITE_URL)),
            content_dir: PathBuf::from(vars.or("CONTENT_DIR", DEFAULT_CONTENT_DIR)),
            static_dir: PathBuf::from(vars.or("STATIC_DIR", DEFAULT_STATIC_DIR)),
            views_api_url: vars.optional("VIEWS_API_URL").map(trim_slash),
            spotify: SpotifyConfig {
                credentials: SpotifyCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                },
                api_url: trim_slash(vars.or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)),
                token_url: vars.or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            },
        })
    }
}

/// Resolves the posts directory from the process environment.
///
/// Listing posts needs no Spotify credentials, so this reads only
/// `CONTENT_DIR` instead of building a full [`Config`].
pub fn content_dir_from_env() -> PathBuf {
    content_dir_from_lookup(|name| env::var(name).ok())
}

pub fn content_dir_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    PathBuf::from(Vars(&lookup).or("CONTENT_DIR", DEFAULT_CONTENT_DIR))
}

/// Settings for the one-off `auth` command that obtains a refresh token.
///
/// Unlike [`Config`] this does not require `SPOTIFY_REFRESH_TOKEN`, since
/// producing one is the whole point of the command.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSetup {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_addr: SocketAddr,
}

impl AuthSetup {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);
        let mut missing = Vec::new();

        let client_id = vars.required("SPOTIFY_CLIENT_ID", &mut missing);
        let client_secret = vars.required("SPOTIFY_CLIENT_SECRET", &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(AuthSetup {
            client_id,
            client_secret,
            auth_url: vars.or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            token_url: vars.or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            redirect_uri: vars.or("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI),
            scope: vars.or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
            server_addr: vars.socket_addr("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)?,
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    // empty values count as unset
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &'static str, missing: &mut Vec<&'static str>) -> String {
        self.optional(name).unwrap_or_else(|| {
            missing.push(name);
            String::new()
        })
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn socket_addr(&self, name: &'static str, default: &str) -> Result<SocketAddr, ConfigError> {
        self.or(name, default)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
