//! Example: Discover the authorization provider for a RadioTAG service
//!
//! Run with: cargo run --example discover_auth_provider -- https://radiotag.example.com

use radiotag::RadioTagClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get service URL from command line or use default
    let base_url = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://radiotag.prototyping.bbc.co.uk".to_string());

    println!("Discovering authorization provider for {}...\n", base_url);

    let client = RadioTagClient::new().await?;
    let provider = client.get_auth_provider(&base_url).await?;

    println!("Authorization provider: {}", provider.base_url);
    println!("Supported modes:");
    println!("  client:    {}", provider.modes.client);
    println!("  user:      {}", provider.modes.user);
    println!("  anonymous: {}", provider.modes.anonymous);

    Ok(())
}
