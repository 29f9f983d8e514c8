use std::sync::Arc;

use askama::Template;
use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use url::form_urlencoded;

use crate::{
    api::found,
    server::AppState,
    spotify::auth::{self, CallbackParams},
    types::Token,
    utils,
};

#[derive(Template)]
#[template(path = "callback.html")]
struct CallbackPage<'a> {
    has_refresh_token: bool,
    refresh_token: &'a str,
    access_token: String,
    expires_in: u64,
    token_type: &'a str,
    scope: &'a str,
}

impl<'a> CallbackPage<'a> {
    fn new(token: &'a Token) -> Self {
        let refresh_token = token.refresh_token.as_deref().unwrap_or_default();
        Self {
            has_refresh_token: !refresh_token.is_empty(),
            refresh_token,
            access_token: utils::mask(&token.access_token, 50),
            expires_in: token.expires_in,
            token_type: &token.token_type,
            scope: &token.scope,
        }
    }
}

/// Completes the PKCE flow and shows the refresh token for the operator to copy.
///
/// Failures send the browser back to the site root with a `spotify_error` reason.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let token =
        match auth::complete_authorization(&state.http, &state.config, &state.verifiers, &params)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "spotify authorization failed");
                return error_redirect(&e.reason_code());
            }
        };

    tracing::info!(
        access_token = %utils::mask(&token.access_token, 20),
        refresh_token = %utils::mask(token.refresh_token.as_deref().unwrap_or_default(), 20),
        expires_in = token.expires_in,
        "spotify tokens received"
    );

    let page = CallbackPage::new(&token);
    if !page.has_refresh_token {
        tracing::warn!("token response carried no refresh token");
    }
    let page = page.render();
    state.issued.send_replace(Some(token.clone()));

    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render callback page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

fn error_redirect(reason: &str) -> Response {
    let reason: String = form_urlencoded::byte_serialize(reason.as_bytes()).collect();
    found(&format!("/?spotify_error={reason}"))
}
