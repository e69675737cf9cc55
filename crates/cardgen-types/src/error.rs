// Error taxonomy — one error type for the whole client.

use serde::{Deserialize, Serialize};

/// Discriminator over every failure the client can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No response within the request deadline.
    Timeout,
    /// The service answered with a non-2xx HTTP status.
    Service,
    /// The service answered 200 but flagged the generation as failed.
    Application,
    /// An SSE record whose payload could not be parsed.
    MalformedEvent,
    /// Connection-level failure (DNS, refused, reset, body read).
    Transport,
    /// Client misuse: invalid builder input or request fields.
    Configuration,
}

/// The single error type for the library.
///
/// `retryable` is advisory metadata for callers; the client itself never
/// retries a request.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    /// HTTP status, present on `Service` errors.
    pub status_code: Option<u16>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Request deadline elapsed without a response.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            message: message.into(),
            retryable: true,
            status_code: None,
            source: None,
        }
    }

    /// Non-2xx HTTP status. 5xx statuses are marked retryable, 4xx are not.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Service,
            message: message.into(),
            retryable: (500..=599).contains(&status),
            status_code: Some(status),
            source: None,
        }
    }

    /// The service reported a logical failure in an otherwise valid response.
    pub fn application(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Application,
            message: message.into(),
            retryable: false,
            status_code: None,
            source: None,
        }
    }

    /// An SSE record that failed to decode. `event` is the wire event name.
    pub fn malformed_event(event: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedEvent,
            message: format!("malformed '{event}' event: {}", detail.into()),
            retryable: false,
            status_code: None,
            source: None,
        }
    }

    /// Connection-level failure with the underlying cause attached.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            retryable: true,
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Invalid configuration or request construction.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            message: message.into(),
            retryable: false,
            status_code: None,
            source: None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
