mod common;

use std::sync::Arc;

use axum::{
    Extension,
    body::to_bytes,
    extract::Query,
    http::{StatusCode, header},
    response::Response,
};
use serde_json::Value;
use spotnow::{
    api,
    server::AppState,
    spotify::auth::CallbackParams,
};

use common::{EPISODE_BODY, TRACK_BODY, mock_config, mock_player, mock_refresh};

async fn body_string(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: Response) -> Value {
    serde_json::from_str(&body_string(res).await).unwrap()
}

fn location(res: &Response) -> &str {
    res.headers()[header::LOCATION].to_str().unwrap()
}

fn state(server: &mockito::ServerGuard) -> Arc<AppState> {
    let mut config = mock_config(server);
    config.refresh_token = Some("AQDrefresh".to_string());
    Arc::new(AppState::new(config))
}

#[tokio::test]
async fn now_playing_refresh_failure_is_500_with_empty_state() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let res = api::now_playing(Extension(state(&server))).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await, serde_json::json!({ "isPlaying": false }));
}

#[tokio::test]
async fn now_playing_track_is_cached() {
    let mut server = mockito::Server::new_async().await;
    mock_refresh(&mut server, "access-1").await;
    mock_player(&mut server, 200, TRACK_BODY).await;

    let res = api::now_playing(Extension(state(&server))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CACHE_CONTROL],
        api::TRACK_CACHE_CONTROL
    );
    assert_eq!(
        body_json(res).await,
        serde_json::json!({
            "isPlaying": true,
            "title": "Song A",
            "artist": "X, Y",
            "songUrl": "https://open.spotify.com/track/1"
        })
    );
}

#[tokio::test]
async fn now_playing_episode_and_empty_are_not_cached() {
    let mut server = mockito::Server::new_async().await;
    mock_refresh(&mut server, "access-1").await;
    mock_player(&mut server, 200, EPISODE_BODY).await;

    let res = api::now_playing(Extension(state(&server))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::CACHE_CONTROL).is_none());
    assert_eq!(
        body_json(res).await,
        serde_json::json!({
            "isPlaying": true,
            "title": "Podcast",
            "songUrl": "https://open.spotify.com"
        })
    );

    let mut server = mockito::Server::new_async().await;
    mock_refresh(&mut server, "access-1").await;
    mock_player(&mut server, 204, "").await;

    let res = api::now_playing(Extension(state(&server))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::CACHE_CONTROL).is_none());
    assert_eq!(body_json(res).await, serde_json::json!({ "isPlaying": false }));
}

#[tokio::test]
async fn authorize_redirects_to_spotify() {
    let server = mockito::Server::new_async().await;
    let state = state(&server);

    let res = api::authorize(Extension(Arc::clone(&state))).await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let url = url::Url::parse(location(&res)).unwrap();
    assert_eq!(url.path(), "/authorize");
    let challenge = url
        .query_pairs()
        .find(|(k, _)| k == "code_challenge")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(url.query().unwrap().contains("code_challenge_method=S256"));

    let verifier = state.verifiers.get(None).await.unwrap();
    assert_eq!(challenge, spotnow::utils::generate_code_challenge(&verifier));
}

#[tokio::test]
async fn callback_failures_redirect_with_reason() {
    let server = mockito::Server::new_async().await;
    let state = state(&server);

    let cases = [
        (
            CallbackParams {
                error: Some("access_denied".into()),
                ..Default::default()
            },
            "/?spotify_error=access_denied",
        ),
        (CallbackParams::default(), "/?spotify_error=no_code"),
        (
            CallbackParams {
                code: Some("abc".into()),
                ..Default::default()
            },
            "/?spotify_error=missing_verifier",
        ),
    ];

    for (params, expected) in cases {
        let res = api::callback(Query(params), Extension(Arc::clone(&state))).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), expected);
    }
}

#[tokio::test]
async fn callback_error_reason_is_encoded() {
    let server = mockito::Server::new_async().await;
    let params = CallbackParams {
        error: Some("bad thing&more".into()),
        ..Default::default()
    };

    let res = api::callback(Query(params), Extension(state(&server))).await;
    assert_eq!(location(&res), "/?spotify_error=bad+thing%26more");
}

#[tokio::test]
async fn callback_exchange_failure_redirects() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;
    let state = state(&server);
    api::authorize(Extension(Arc::clone(&state))).await;

    let params = CallbackParams {
        code: Some("abc".into()),
        ..Default::default()
    };
    let res = api::callback(Query(params), Extension(state)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/?spotify_error=token_exchange_failed");
}

#[tokio::test]
async fn callback_success_shows_refresh_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"access_token":"BQDaccess","token_type":"Bearer","scope":"user-read-currently-playing","expires_in":3600,"refresh_token":"AQD<refresh>"}"#,
        )
        .create_async()
        .await;
    let state = state(&server);
    let mut issued = state.issued.subscribe();
    api::authorize(Extension(Arc::clone(&state))).await;

    let params = CallbackParams {
        code: Some("abc".into()),
        ..Default::default()
    };
    let res = api::callback(Query(params), Extension(Arc::clone(&state))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_string(res).await;
    assert!(html.contains("SPOTIFY_REFRESH_TOKEN="));
    assert!(html.contains(r#"SPOTIFY_REFRESH_TOKEN="AQD&#60;refresh&#62;""#));
    assert!(!html.contains("AQD<refresh>"));
    assert!(!html.contains("missing-refresh-token"));

    assert!(issued.has_changed().unwrap());
    let token = issued.borrow_and_update().clone().unwrap();
    assert_eq!(token.refresh_token.as_deref(), Some("AQD<refresh>"));
    assert!(state.verifiers.get(None).await.is_none());
}

#[tokio::test]
async fn callback_without_refresh_token_warns() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"BQDaccess","token_type":"Bearer","expires_in":3600}"#)
        .create_async()
        .await;
    let state = state(&server);
    api::authorize(Extension(Arc::clone(&state))).await;

    let params = CallbackParams {
        code: Some("abc".into()),
        ..Default::default()
    };
    let res = api::callback(Query(params), Extension(state)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_string(res).await;
    assert!(html.contains("missing-refresh-token"));
    assert!(!html.contains(r#"SPOTIFY_REFRESH_TOKEN="""#));
}

#[tokio::test]
async fn health_reports_version() {
    let body = api::health().await.0;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
