#![allow(dead_code)]

use mockito::{Mock, ServerGuard};
use spotnow::config::Config;

pub const CLIENT_ID: &str = "0123456789abcdef0123456789abcdef";

/// Config whose Spotify endpoints all point at the mock server.
pub fn mock_config(server: &ServerGuard) -> Config {
    let mut config = Config::new(CLIENT_ID);
    config.auth_url = format!("{}/authorize", server.url());
    config.token_url = format!("{}/api/token", server.url());
    config.api_url = format!("{}/v1", server.url());
    config
}

pub async fn mock_refresh(server: &mut ServerGuard, access_token: &str) -> Mock {
    server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"access_token":"{access_token}","token_type":"Bearer","expires_in":3600,"scope":"user-read-currently-playing user-read-playback-state"}}"#
        ))
        .create_async()
        .await
}

pub async fn mock_player(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/v1/me/player/currently-playing")
        .match_header("authorization", "Bearer access-1")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub const TRACK_BODY: &str = r#"{
    "is_playing": true,
    "currently_playing_type": "track",
    "progress_ms": 1234,
    "item": {
        "name": "Song A",
        "artists": [{"name": "X"}, {"name": "Y"}],
        "external_urls": {"spotify": "https://open.spotify.com/track/1"}
    }
}"#;

pub const EPISODE_BODY: &str = r#"{
    "is_playing": true,
    "currently_playing_type": "episode",
    "item": {
        "name": "Episode 42",
        "show": {"name": "Some Show"},
        "external_urls": {"spotify": "https://open.spotify.com/episode/42"}
    }
}"#;
