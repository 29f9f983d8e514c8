//! # API Module
//!
//! HTTP endpoints served by spotnow.
//!
//! ## Endpoints
//!
//! ### Authorization
//!
//! - [`authorize`] - `GET /api/spotify`. Generates a PKCE pair, stores the
//!   verifier and answers with a `302` to Spotify's consent page.
//! - [`callback`] - `GET /api/spotify/callback`. Exchanges the one-time code
//!   for a token pair and renders the refresh token for manual copy into
//!   configuration. Any failure redirects to `/?spotify_error=<reason>`.
//!
//! ### Now playing
//!
//! - [`now_playing`] - `GET /api/now-playing`. Returns the normalized
//!   [`crate::types::NowPlaying`] snapshot. Track responses carry a shared
//!   cache header; a failed token refresh answers `500` with
//!   `{"isPlaying":false}` so the widget keeps rendering.
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use spotnow::{config::Config, server::{AppState, router}};
//!
//! let app = router(Arc::new(AppState::new(Config::from_env()?)));
//! ```

mod authorize;
mod callback;
mod health;
mod now_playing;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub use authorize::authorize;
pub use callback::callback;
pub use health::health;
pub use now_playing::TRACK_CACHE_CONTROL;
pub use now_playing::now_playing;

/// Plain `302 Found` redirect.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
