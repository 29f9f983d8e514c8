use std::sync::Arc;

use axum::{
    Extension, Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{server::AppState, spotify::player, types::NowPlaying};

pub const TRACK_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=30";

pub async fn now_playing(Extension(state): Extension<Arc<AppState>>) -> Response {
    match player::now_playing(&state.http, &state.config).await {
        Ok(np) if np.is_track() => {
            ([(header::CACHE_CONTROL, TRACK_CACHE_CONTROL)], Json(np)).into_response()
        }
        Ok(np) => Json(np).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error fetching now playing");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NowPlaying::nothing()),
            )
                .into_response()
        }
    }
}
