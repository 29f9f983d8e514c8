use std::sync::Arc;

use crate::{
    config::Config,
    error, info,
    server::{AppState, start_api_server},
};

pub async fn serve(config: Config) {
    info!("Serving on http://{}", config.server_addr);
    if config.refresh_token.is_none() {
        info!(
            "No refresh token yet, open http://{}/api/spotify to authorize.",
            config.server_addr
        );
    }

    if let Err(e) = start_api_server(Arc::new(AppState::new(config))).await {
        error!("Server failed: {}", e);
    }
}
