/// Streaming generation with live progress output.
///
/// Shows `generate_streaming()` yielding typed events as they arrive and
/// the terminal event ending the sequence.
///
/// Run: cargo run --example streaming
/// Requires: a card generation service (default http://127.0.0.1:8082,
/// override with CARDGEN_BASE_URL).
use std::io::Write;

use futures::StreamExt;

use cardgen::{CardClient, GenerationRequest, StreamEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = CardClient::from_env()?;
    let request = GenerationRequest::new("JavaScript Async/Await", "daily-knowledge-card-template.md")?;

    let mut events = client.generate_streaming(request);

    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::Output(text) => {
                print!("{text}");
                std::io::stdout().flush()?;
            }
            StreamEvent::Status(map) => {
                eprintln!("[status] {}", serde_json::Value::Object(map));
            }
            StreamEvent::Completed(result) => {
                println!("\ndone: {} in {}ms", result.file_name, result.generation_time_ms);
            }
            StreamEvent::Error(message) => {
                eprintln!("\ngeneration failed: {message}");
            }
            StreamEvent::Unknown { event, .. } => {
                eprintln!("[{event}]");
            }
        }
    }

    Ok(())
}
