//! # CLI Module
//!
//! Operator-facing commands. Each command except [`check`] takes an already
//! loaded [`crate::config::Config`], reports progress with the colored output macros
//! and terminates the process through [`crate::error!`] on fatal failures.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP server (authorization, callback, now-playing).
//! - [`auth`] - Runs the PKCE flow end to end from the terminal: starts the
//!   callback server, opens the browser, waits for the callback and prints the
//!   `SPOTIFY_REFRESH_TOKEN` line.
//! - [`now_playing`] - Fetches the current snapshot once and prints it.
//! - [`check`] - Shows the effective configuration and common mistakes
//!   (placeholder client id, missing refresh token, unusable redirect URI).
//!
//! ## Initial Setup
//! ```bash
//! spotnow check                    # Verify client id and redirect URI
//! spotnow auth                     # Authorize and copy the refresh token
//! spotnow now-playing              # Try it
//! spotnow serve                    # Run the endpoints
//! ```

mod auth;
mod check;
mod now_playing;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use check::check;
pub use now_playing::now_playing;
pub use serve::serve;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
