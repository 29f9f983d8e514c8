//! Configuration management for spotnow.
//!
//! All settings come from environment variables. Before reading them,
//! [`load_env`] merges `.env` files into the process environment:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/spotnow/.env`)
//! 4. Application defaults (where applicable)
//!
//! The refresh token starts out empty and is filled in by the operator after
//! running the authorization flow once.

use std::{env, fmt, path::PathBuf, str::FromStr};

use crate::error::SpotifyError;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/api/spotify/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

/// Scopes needed to read the currently playing item.
pub const SCOPES: [&str; 2] = ["user-read-currently-playing", "user-read-playback-state"];

/// Loads `.env` files into the process environment.
///
/// Missing files are not an error; existing variables are never overwritten.
pub fn load_env() {
    let _ = dotenv::dotenv();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotnow/.env");
    if path.is_file() {
        let _ = dotenv::from_path(path);
    }
}

/// How pending PKCE verifiers are held between redirect and callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateMode {
    /// One process-wide slot; a new authorization replaces the pending one.
    #[default]
    Single,
    /// Verifiers keyed by the OAuth `state` parameter with a short TTL.
    Keyed,
}

impl FromStr for StateMode {
    type Err = SpotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "single" => Ok(StateMode::Single),
            "keyed" => Ok(StateMode::Keyed),
            other => Err(SpotifyError::InvalidConfiguration {
                name: "SPOTIFY_PKCE_STATE_MODE",
                reason: format!("expected `single` or `keyed`, got `{other}`"),
            }),
        }
    }
}

impl fmt::Display for StateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateMode::Single => f.write_str("single"),
            StateMode::Keyed => f.write_str("keyed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    /// Optional under PKCE. When present the refresh call uses Basic auth.
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub state_mode: StateMode,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SpotifyError> {
        if let Some(mode) = non_empty("SPOTIFY_PKCE_STATE_MODE") {
            mode.parse::<StateMode>()?;
        }

        let config = Self::from_env_unchecked();
        if config.client_id.is_empty() {
            return Err(SpotifyError::MissingConfiguration("SPOTIFY_CLIENT_ID"));
        }
        Ok(config)
    }

    /// Reads the same variables as [`Config::from_env`] without validating them.
    ///
    /// A missing client id stays empty and an unknown state mode falls back to
    /// the default, so `check` can still show what is configured.
    pub fn from_env_unchecked() -> Self {
        Self {
            client_id: non_empty("SPOTIFY_CLIENT_ID").unwrap_or_default(),
            client_secret: non_empty("SPOTIFY_CLIENT_SECRET"),
            refresh_token: non_empty("SPOTIFY_REFRESH_TOKEN"),
            redirect_uri: or_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            state_mode: non_empty("SPOTIFY_PKCE_STATE_MODE")
                .and_then(|mode| mode.parse().ok())
                .unwrap_or_default(),
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        }
    }

    /// Config pointing at the public Spotify endpoints. Mostly useful in tests.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            refresh_token: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            state_mode: StateMode::default(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }

    pub fn scope(&self) -> String {
        SCOPES.join(" ")
    }

    pub fn now_playing_url(&self) -> String {
        format!(
            "{api}/me/player/currently-playing",
            api = self.api_url.trim_end_matches('/')
        )
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    non_empty(key).unwrap_or_else(|| default.to_string())
}
