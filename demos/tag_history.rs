//! Example: List the tag history recorded by a RadioTAG service
//!
//! Run with: cargo run --example tag_history -- https://radiotag.example.com [access-token]

use radiotag::RadioTagClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://radiotag.prototyping.bbc.co.uk".to_string());
    let access_token = env::args().nth(2);

    println!("Fetching tag history from {}...\n", base_url);

    let client = RadioTagClient::new().await?;
    let tags = client.get_tags(&base_url, access_token.as_deref()).await?;

    if tags.is_empty() {
        println!("No tags recorded yet.");
        return Ok(());
    }

    println!("{} tags:", tags.len());
    for tag in &tags {
        println!("---");
        println!("  Title:     {}", tag.title);
        println!("  Summary:   {}", tag.summary);
        println!("  Published: {}", tag.published);
        println!("  Service:   {}", tag.author);
    }

    Ok(())
}
