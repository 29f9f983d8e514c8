use reqwest::Client;

use crate::{config::Config, error, spotify::player};

/// One-shot fetch, printed as the same JSON the HTTP endpoint returns.
pub async fn now_playing(config: &Config) {
    let np = match player::now_playing(&Client::new(), config).await {
        Ok(np) => np,
        Err(e) => error!("Failed to fetch now playing: {}", e),
    };

    match serde_json::to_string_pretty(&np) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize now playing: {}", e),
    }
}
