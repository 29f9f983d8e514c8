//! # Spotify Integration Module
//!
//! Client side of the two Spotify services spotnow talks to: the accounts
//! service (authorization and token endpoints) and the Web API player
//! endpoint.
//!
//! ## Modules
//!
//! [`auth`] - OAuth 2.0 Authorization Code flow with PKCE:
//! - **Authorization URL**: fresh verifier/challenge pair per attempt, verifier
//!   stored before the URL is handed out
//! - **Code Exchange**: trades the callback code plus stored verifier for a token
//!   pair, consuming the verifier on success
//! - **Refresh**: trades the configured refresh token for a short-lived access
//!   token (Basic auth when a client secret is set, `client_id` in the body
//!   otherwise)
//!
//! [`player`] - Now-playing retrieval and normalization:
//! - `GET /me/player/currently-playing` with a freshly minted access token
//! - tracks, podcast episodes and "nothing playing" map to [`crate::types::NowPlaying`]
//!
//! ## Caching
//!
//! There is none. Every now-playing request performs a full token refresh;
//! the access token is never stored.
//!
//! ## Error Types
//!
//! All fallible operations return [`crate::error::SpotifyError`]. Nothing here
//! retries; callers poll again.

pub mod auth;
pub mod player;
