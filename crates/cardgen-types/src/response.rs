// Generation results and the buffered-endpoint response envelope.

use serde::{Deserialize, Serialize};

/// The payload of one successful generation.
///
/// `content` is whatever the service produced for the template: a JSON object
/// for structured cards, or a plain string when the generated file was not
/// valid JSON. The client treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Wall-clock generation time reported by the service, in milliseconds.
    #[serde(rename = "generationTime", default)]
    pub generation_time_ms: u64,
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Response envelope of `POST /api/generate/card`.
///
/// `success: false` means the service ran but the generation itself failed;
/// `message` then carries the reason.
#[derive(Debug, Deserialize)]
pub struct CardEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GenerationResult>,
    #[serde(default)]
    pub message: Option<String>,
}
