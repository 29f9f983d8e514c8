use chrono::Utc;
use reqwest::Client;
use url::Url;

use crate::{
    config::Config, error::SpotifyError, management::VerifierStore, types::Token, utils,
};

/// Query parameters Spotify sends back to the redirect URI.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// Builds the Spotify authorization URL for a fresh PKCE pair.
///
/// The verifier is stored before the URL is returned, since the callback can
/// arrive on another task as soon as the browser follows the redirect. In
/// keyed mode a random `state` is added to the URL and used as the store key.
pub async fn authorize_url(config: &Config, store: &VerifierStore) -> Result<String, SpotifyError> {
    let pkce = utils::generate_pkce();
    let state = store.is_keyed().then(utils::generate_state);

    let mut url = Url::parse(&config.auth_url).map_err(|e| SpotifyError::InvalidConfiguration {
        name: "SPOTIFY_AUTH_URL",
        reason: e.to_string(),
    })?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("scope", &config.scope())
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("code_challenge_method", "S256")
            .append_pair("code_challenge", &pkce.challenge);
        if let Some(state) = &state {
            query.append_pair("state", state);
        }
    }

    store.store(state.as_deref(), pkce.verifier).await;

    Ok(url.into())
}

/// Handles the redirect back from Spotify and exchanges the code for tokens.
///
/// The pending verifier is consumed only when the exchange succeeds.
pub async fn complete_authorization(
    client: &Client,
    config: &Config,
    store: &VerifierStore,
    params: &CallbackParams,
) -> Result<Token, SpotifyError> {
    if let Some(error) = &params.error {
        return Err(SpotifyError::AuthorizationDenied(error.clone()));
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return Err(SpotifyError::MissingAuthorizationCode);
    };

    let state = params.state.as_deref();
    let Some(verifier) = store.get(state).await else {
        return Err(SpotifyError::MissingVerifier);
    };

    let token = exchange_code_pkce(client, config, code, &verifier).await?;
    store.consume(state, &verifier).await;

    Ok(token)
}

pub async fn exchange_code_pkce(
    client: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, SpotifyError> {
    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(SpotifyError::TokenExchangeFailed { status, body });
    }

    let mut token: Token = res.json().await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}

/// Trades the long-lived refresh token for a fresh access token.
///
/// With a client secret configured the client authenticates with HTTP Basic,
/// otherwise `client_id` goes into the form body as a public PKCE client.
pub async fn refresh_token(client: &Client, config: &Config) -> Result<Token, SpotifyError> {
    let Some(refresh_token) = config.refresh_token.as_deref() else {
        return Err(SpotifyError::MissingConfiguration("SPOTIFY_REFRESH_TOKEN"));
    };

    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    let mut req = client.post(&config.token_url);
    match config.client_secret.as_deref() {
        Some(secret) => req = req.basic_auth(&config.client_id, Some(secret)),
        None => form.push(("client_id", config.client_id.as_str())),
    }

    let res = req
        .form(&form)
        .send()
        .await
        .map_err(|e| SpotifyError::UnexpectedFetchFailure(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body,
            refresh_token = %utils::mask(refresh_token, 10),
            "spotify token refresh error"
        );
        return Err(SpotifyError::TokenRefreshFailed { status, body });
    }

    let mut token: Token = res
        .json()
        .await
        .map_err(|e| SpotifyError::UnexpectedFetchFailure(e.to_string()))?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}
