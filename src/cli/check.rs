use tabled::Table;

use crate::{
    config::Config, error::SpotifyError, info, success, types::ConfigTableRow, utils, warning,
};

/// Spotify client ids are 32 hex characters.
const CLIENT_ID_LEN: usize = 32;

/// Prints the effective configuration and flags common setup mistakes.
///
/// Reads the environment itself so that a missing client id is reported like
/// any other problem instead of aborting the command.
pub fn check() {
    let config = Config::from_env_unchecked();
    println!("{}", Table::new(rows(&config)));

    let mut problems = problems(&config);
    if let Err(SpotifyError::InvalidConfiguration { name, reason }) = Config::from_env() {
        problems.push(format!("{name} is invalid: {reason}"));
    }

    for problem in &problems {
        warning!("{}", problem);
    }

    info!(
        "Register this redirect URI in the Spotify developer dashboard exactly as shown: {}",
        config.redirect_uri
    );

    if problems.is_empty() {
        success!("Configuration looks good.");
    }
}

fn problems(config: &Config) -> Vec<String> {
    let mut problems = Vec::new();

    if config.client_id.is_empty() {
        problems.push("SPOTIFY_CLIENT_ID is not set.".to_string());
    } else if config.client_id.len() != CLIENT_ID_LEN {
        problems.push(format!(
            "Client ID is {} characters long, Spotify client IDs have {}. Is it a placeholder?",
            config.client_id.len(),
            CLIENT_ID_LEN
        ));
    }

    if config.refresh_token.is_none() {
        problems.push("No refresh token configured. Run `spotnow auth` first.".to_string());
    }

    if !config.redirect_uri.starts_with("http://127.0.0.1")
        && !config.redirect_uri.starts_with("https://")
    {
        problems.push("Spotify only accepts loopback IP or https redirect URIs.".to_string());
    }

    problems
}

fn rows(config: &Config) -> Vec<ConfigTableRow> {
    vec![
        row(
            "SPOTIFY_CLIENT_ID",
            if config.client_id.is_empty() {
                "(not set)".to_string()
            } else {
                config.client_id.clone()
            },
        ),
        row(
            "SPOTIFY_CLIENT_SECRET",
            config
                .client_secret
                .as_deref()
                .map(|s| utils::mask(s, 4))
                .unwrap_or_else(|| "(not set, public PKCE client)".to_string()),
        ),
        row(
            "SPOTIFY_REFRESH_TOKEN",
            config
                .refresh_token
                .as_deref()
                .map(|t| utils::mask(t, 10))
                .unwrap_or_else(|| "(not set)".to_string()),
        ),
        row("SPOTIFY_REDIRECT_URI", config.redirect_uri.clone()),
        row("SPOTIFY_AUTH_URL", config.auth_url.clone()),
        row("SPOTIFY_TOKEN_URL", config.token_url.clone()),
        row("SPOTIFY_API_URL", config.api_url.clone()),
        row("SPOTIFY_PKCE_STATE_MODE", config.state_mode.to_string()),
        row("SERVER_ADDRESS", config.server_addr.clone()),
    ]
}

fn row(key: &str, value: String) -> ConfigTableRow {
    ConfigTableRow {
        key: key.to_string(),
        value,
    }
}
