//! Simple harness for the deck loader.
//!
//! Loads a deck from the configured pod server and logs every card, without
//! making any decisions.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{Config, DeckLoader};
use sources::{FixedPosition, HttpPodClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")),
        )
        .init();

    info!("Starting deck loader harness");
    let config = Config::from_env()?;

    let client = HttpPodClient::new(config.pod_server_url.clone())?;
    let loader = DeckLoader::new(
        Arc::new(client),
        Arc::new(FixedPosition::unavailable()),
        config.max_distance_m,
    );

    let deck = loader.load().await?;
    info!("Deck has {} cards:", deck.queue.len());
    for (i, pod) in deck.queue.upcoming().enumerate() {
        let details = deck.details_for(pod);
        info!(
            "{}. {} [{}] {}",
            i + 1,
            pod.name,
            pod.tags.join(", "),
            details
                .and_then(|d| d.schedule_label.clone())
                .unwrap_or_default()
        );
    }

    Ok(())
}
