//! spotnow library
//!
//! Spotify "now playing" support for a personal site: the OAuth 2.0
//! Authorization Code flow with PKCE used once to mint a refresh token, and
//! the per-request refresh + currently-playing lookup behind the site widget.
//!
//! # Modules
//!
//! - `api` - HTTP handlers (authorize, callback, now-playing, health)
//! - `cli` - Operator commands
//! - `config` - Configuration from environment variables and `.env` files
//! - `error` - Error type shared by the flow and the fetcher
//! - `management` - Pending PKCE verifier storage
//! - `server` - Router, shared state and server startup
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE generation and small helpers
//!
//! # Example
//!
//! ```
//! use spotnow::{config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotnow::Res<()> {
//!     config::load_env();
//!     let config = config::Config::from_env()?;
//!     let np = spotify::player::now_playing(&reqwest::Client::new(), &config).await?;
//!     println!("{:?}", np);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::SpotifyError;

/// A convenient Result type alias for top-level plumbing.
///
/// Library operations return [`SpotifyError`]; binaries and server startup
/// box whatever they hit.
///
/// # Example
///
/// ```
/// use spotnow::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Serving on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with status 1.
///
/// Only for failures the operator has to fix before trying again. The macro
/// diverges, so it can stand in for a value in a `match` arm:
///
/// ```
/// let config = match Config::from_env() {
///     Ok(config) => config,
///     Err(e) => error!("Cannot load configuration: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
