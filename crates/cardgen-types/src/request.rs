// GenerationRequest — one topic + template pair bound for the service.

use std::time::Duration;

use serde::Serialize;

use crate::error::Error;

/// A single generation request. Immutable once constructed; serializes
/// directly as the wire body `{"topic": ..., "templateName": ...}`.
/// The timeout is client-side only and never sent to the service.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(rename = "templateName")]
    pub template: String,
    /// Per-request deadline override. When unset, the client's configured
    /// `request_timeout` applies.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl GenerationRequest {
    /// Validate and construct a request. The request carries no deadline of
    /// its own until [`with_timeout`] sets one; the client's configured
    /// default applies otherwise.
    ///
    /// [`with_timeout`]: GenerationRequest::with_timeout
    pub fn new(topic: impl Into<String>, template: impl Into<String>) -> Result<Self, Error> {
        let topic = topic.into();
        let template = template.into();
        if topic.trim().is_empty() {
            return Err(Error::configuration("topic must not be empty"));
        }
        if template.trim().is_empty() {
            return Err(Error::configuration("template must not be empty"));
        }
        Ok(Self {
            topic,
            template,
            timeout: None,
        })
    }

    /// Override the client-level deadline for this request. Must be non-zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        if timeout.is_zero() {
            return Err(Error::configuration("request timeout must be positive"));
        }
        self.timeout = Some(timeout);
        Ok(self)
    }
}
