use std::sync::Arc;

use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{api::found, server::AppState, spotify::auth};

/// Redirects the browser to Spotify's consent page.
pub async fn authorize(Extension(state): Extension<Arc<AppState>>) -> Response {
    match auth::authorize_url(&state.config, &state.verifiers).await {
        Ok(url) => found(&url),
        Err(e) => {
            tracing::error!(error = %e, "error generating spotify authorization url");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to generate authorization URL" })),
            )
                .into_response()
        }
    }
}
