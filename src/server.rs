use axum::{Extension, Router, routing::get};
use reqwest::Client;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::watch};

use crate::{
    Res, api,
    config::Config,
    error::SpotifyError,
    management::VerifierStore,
    types::Token,
};

/// State shared by all request handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub verifiers: VerifierStore,
    pub http: Client,
    /// Last token pair minted by the callback, for the `auth` command to pick up.
    pub issued: watch::Sender<Option<Token>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let verifiers = VerifierStore::new(config.state_mode);
        let (issued, _) = watch::channel(None);
        Self {
            config,
            verifiers,
            http: Client::new(),
            issued,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/spotify", get(api::authorize))
        .route("/api/spotify/callback", get(api::callback))
        .route("/api/now-playing", get(api::now_playing))
        .layer(Extension(state))
}

pub async fn start_api_server(state: Arc<AppState>) -> Res<()> {
    let listener = bind_api_server(&state.config).await?;
    serve_api(listener, state).await
}

/// Binds `SERVER_ADDRESS` so bind failures surface before anything waits on the server.
pub async fn bind_api_server(config: &Config) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(&config.server_addr).map_err(|e| {
        SpotifyError::InvalidConfiguration {
            name: "SERVER_ADDRESS",
            reason: e.to_string(),
        }
    })?;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    Ok(listener)
}

pub async fn serve_api(listener: TcpListener, state: Arc<AppState>) -> Res<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
