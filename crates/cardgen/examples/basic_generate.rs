/// One buffered generation plus a health probe.
///
/// Shows `CardClient::from_env()`, `check_health()`, and `generate_once()`.
///
/// Run: cargo run --example basic_generate
/// Requires: a card generation service (default http://127.0.0.1:8082,
/// override with CARDGEN_BASE_URL).
use cardgen::{CardClient, GenerationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CardClient::from_env()?;

    if !client.check_health().await {
        eprintln!("service is not reachable at {}", client.config().base_url);
        std::process::exit(1);
    }

    let request = GenerationRequest::new("Rust Ownership", "daily-knowledge-card-template.md")?;
    let result = client.generate_once(&request).await?;

    println!("Generated: {}", result.file_name);
    println!("Took: {}ms", result.generation_time_ms);
    println!("Content: {}", serde_json::to_string_pretty(&result.content)?);

    Ok(())
}
