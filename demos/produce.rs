//! Produce a record to a Streamr stream
//!
//! Reads `STREAMR_API_KEY` (and optionally `STREAMR_BASE_URL`) from the environment,
//! makes sure a stream with the given name exists and pushes one record to it.
//!
//! Run with: cargo run --example produce -- my-stream-name

use serde_json::json;
use streamr_client::{ClientConfig, StreamService, StreamrClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "streamr-client-demo".to_string());

    let client = StreamrClient::with_config(ClientConfig::from_env()?)?;
    let streams = StreamService::new(client);

    let stream = streams.get_or_create(&name).await?;
    println!("Stream {} ({})", stream.name, stream.id);

    let response = streams
        .produce(&stream.id, &json!({"message": "Hello from Rust", "temperature": 21.5}))
        .await?;
    println!("Produced, status {}", response.status());

    let sub = streams.subscribe(&stream.id, |msg| println!("message: {}", msg))?;
    println!("Registered subscription {}", sub.id);

    Ok(())
}
