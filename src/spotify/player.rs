use reqwest::{Client, StatusCode};

use crate::{
    config::Config,
    error::SpotifyError,
    spotify::auth,
    types::{CurrentlyPlaying, NowPlaying},
};

pub const PODCAST_TITLE: &str = "Podcast";
pub const PODCAST_URL: &str = "https://open.spotify.com";

/// Refreshes the access token and reads the currently playing item.
///
/// Only the refresh step can fail. Anything that goes wrong while querying
/// the player is logged and reported as "nothing playing".
pub async fn now_playing(client: &Client, config: &Config) -> Result<NowPlaying, SpotifyError> {
    let token = auth::refresh_token(client, config).await?;

    match currently_playing(client, config, &token.access_token).await {
        Ok(Some(playing)) => Ok(normalize(playing)),
        Ok(None) => Ok(NowPlaying::nothing()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read currently playing item");
            Ok(NowPlaying::nothing())
        }
    }
}

/// `None` for 204 and for any status of 400 and above.
pub async fn currently_playing(
    client: &Client,
    config: &Config,
    access_token: &str,
) -> Result<Option<CurrentlyPlaying>, reqwest::Error> {
    let res = client
        .get(config.now_playing_url())
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = res.status();
    if status == StatusCode::NO_CONTENT || status.as_u16() >= 400 {
        tracing::debug!(status = %status, "nothing playing");
        return Ok(None);
    }

    Ok(Some(res.json::<CurrentlyPlaying>().await?))
}

pub fn normalize(playing: CurrentlyPlaying) -> NowPlaying {
    match playing.currently_playing_type.as_str() {
        "track" => {
            let Some(item) = playing.item else {
                return NowPlaying::nothing();
            };
            let artist = item
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            NowPlaying {
                is_playing: playing.is_playing,
                artist: Some(artist),
                title: Some(item.name),
                song_url: item.external_urls.spotify,
            }
        }
        "episode" => NowPlaying {
            is_playing: playing.is_playing,
            artist: None,
            title: Some(PODCAST_TITLE.to_string()),
            song_url: Some(PODCAST_URL.to_string()),
        },
        _ => NowPlaying::nothing(),
    }
}
