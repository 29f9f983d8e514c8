use std::{sync::Arc, time::Duration};

use tokio::time::timeout;

use crate::{
    cli::spinner,
    config::Config,
    error, info,
    server::{AppState, bind_api_server, serve_api},
    spotify, success,
    types::Token,
    warning,
};

/// How long to wait for the browser to come back through the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the PKCE flow against a local callback server and prints the refresh
/// token for the operator to store in configuration.
pub async fn auth(config: Config) {
    let state = Arc::new(AppState::new(config));
    let mut issued = state.issued.subscribe();

    let listener = match bind_api_server(&state.config).await {
        Ok(listener) => listener,
        Err(e) => error!(
            "Cannot start the callback server on {}: {}",
            state.config.server_addr, e
        ),
    };

    let server_state = Arc::clone(&state);
    let server = tokio::spawn(async move { serve_api(listener, server_state).await });

    info!(
        "Redirect URI registered in your Spotify app must be exactly: {}",
        state.config.redirect_uri
    );

    // Verifier is stored by this call, before the browser is sent anywhere.
    let auth_url = match spotify::auth::authorize_url(&state.config, &state.verifiers).await {
        Ok(url) => url,
        Err(e) => error!("Failed to build authorization URL: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let pb = spinner("Waiting for Spotify to redirect back...");
    let waited = timeout(CALLBACK_TIMEOUT, async {
        tokio::select! {
            token = issued.wait_for(Option::is_some) => token.ok().and_then(|t| t.clone()),
            stopped = server => {
                if let Ok(Err(e)) = stopped {
                    warning!("Callback server stopped: {}", e);
                }
                None
            }
        }
    })
    .await;
    pb.finish_and_clear();

    match waited {
        Ok(Some(token)) => print_refresh_token(&token),
        Ok(None) => error!("Callback server closed before authorization completed."),
        Err(_) => error!(
            "Authorization timed out after {} seconds.",
            CALLBACK_TIMEOUT.as_secs()
        ),
    }
}

fn print_refresh_token(token: &Token) {
    success!("Authorization successful!");

    match token.refresh_token.as_deref() {
        Some(refresh_token) => {
            info!("Add this line to your .env file and restart the server:");
            println!("SPOTIFY_REFRESH_TOKEN=\"{}\"", refresh_token);
        }
        None => warning!("Spotify did not return a refresh token. Re-run the flow."),
    }
}
