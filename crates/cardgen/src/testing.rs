// Test utilities shared by unit and integration tests.

use cardgen_types::GenerationResult;

/// Build an SSE body from (event name, data) pairs, one record each.
pub fn build_sse_body(events: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (event, data) in events {
        body.push_str(&format!("event: {event}\ndata: {data}\n\n"));
    }
    body
}

/// A minimal successful result fixture.
pub fn sample_result(file_name: &str) -> GenerationResult {
    GenerationResult {
        file_name: file_name.into(),
        generation_time_ms: 1234,
        content: serde_json::json!({"title": "fixture"}),
    }
}

/// The JSON a `completed` SSE record carries for `sample_result`.
pub fn sample_completed_data(file_name: &str) -> String {
    serde_json::json!({
        "fileName": file_name,
        "generationTime": 1234,
        "content": {"title": "fixture"}
    })
    .to_string()
}
