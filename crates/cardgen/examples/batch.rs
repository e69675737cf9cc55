/// Sequential and concurrent batch generation.
///
/// Run: cargo run --example batch
/// Requires: a card generation service (default http://127.0.0.1:8082,
/// override with CARDGEN_BASE_URL).
use cardgen::{CardClient, GenerationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CardClient::from_env()?;

    let requests = ["React Hooks", "Vue 3 Composition API", "Svelte Stores"]
        .iter()
        .map(|topic| GenerationRequest::new(*topic, "daily-knowledge-card-template.md"))
        .collect::<Result<Vec<_>, _>>()?;

    // One at a time, paced by the configured inter-request delay.
    let outcome = client.generate_batch_sequential(requests.clone()).await;
    println!(
        "sequential: {}/{} succeeded",
        outcome.succeeded.len(),
        outcome.total()
    );

    // All at once, capped by max_concurrency; one failure never cancels
    // the rest.
    let outcome = client.generate_batch_concurrent(requests).await;
    println!(
        "concurrent: {}/{} succeeded",
        outcome.succeeded.len(),
        outcome.total()
    );
    for failure in &outcome.failed {
        eprintln!("  {} failed: {}", failure.request.topic, failure.reason);
    }

    Ok(())
}
