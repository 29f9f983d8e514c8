use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the authorization flow and the now-playing fetcher.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Spotify redirected back with an `error` query parameter.
    #[error("authorization denied by Spotify: {0}")]
    AuthorizationDenied(String),

    #[error("no authorization code in callback")]
    MissingAuthorizationCode,

    /// No pending PKCE verifier; the flow has to be restarted.
    #[error("no code verifier found, restart the authorization flow")]
    MissingVerifier,

    #[error("token exchange failed: {status} {body}")]
    TokenExchangeFailed { status: StatusCode, body: String },

    #[error("token refresh failed: {status} {body}")]
    TokenRefreshFailed { status: StatusCode, body: String },

    #[error("unexpected failure while fetching from Spotify: {0}")]
    UnexpectedFetchFailure(String),

    #[error("missing configuration value {0}")]
    MissingConfiguration(&'static str),

    #[error("invalid configuration value {name}: {reason}")]
    InvalidConfiguration { name: &'static str, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl SpotifyError {
    /// Reason string carried by the `spotify_error` redirect parameter.
    pub fn reason_code(&self) -> String {
        match self {
            SpotifyError::AuthorizationDenied(reason) => reason.clone(),
            SpotifyError::MissingAuthorizationCode => "no_code".to_string(),
            SpotifyError::MissingVerifier => "missing_verifier".to_string(),
            _ => "token_exchange_failed".to_string(),
        }
    }
}
