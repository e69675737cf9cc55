// Typed stream events demultiplexed from the SSE wire.

use crate::response::GenerationResult;

/// One event on a generation stream.
///
/// Events are ephemeral: the streaming operation yields each one exactly once
/// and retains nothing. `Completed` and `Error` are terminal; nothing follows
/// them on a well-behaved stream, and the client ignores anything that does.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Incremental generator output text.
    Output(String),
    /// Progress metadata (step names, parameters); shape is service-defined.
    Status(serde_json::Map<String, serde_json::Value>),
    /// Terminal: generation finished, payload carries the result.
    Completed(GenerationResult),
    /// Terminal: generation failed, payload is the reason.
    Error(String),
    /// An event name this client does not recognize, kept verbatim so callers
    /// can observe forward-compatible traffic instead of losing it silently.
    Unknown { event: String, data: String },
}

impl StreamEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Error(_))
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Output(_) => "output",
            Self::Status(_) => "status",
            Self::Completed(_) => "completed",
            Self::Error(_) => "error",
            Self::Unknown { .. } => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> GenerationResult {
        GenerationResult {
            file_name: "card.html".into(),
            generation_time_ms: 1500,
            content: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_terminal_classification() {
        assert!(StreamEvent::Completed(sample_result()).is_terminal());
        assert!(StreamEvent::Error("boom".into()).is_terminal());
        assert!(!StreamEvent::Output("text".into()).is_terminal());
        assert!(!StreamEvent::Status(Default::default()).is_terminal());
        assert!(!StreamEvent::Unknown {
            event: "log".into(),
            data: "{}".into()
        }
        .is_terminal());
    }

    #[test]
    fn test_names() {
        assert_eq!(StreamEvent::Output("x".into()).name(), "output");
        assert_eq!(StreamEvent::Error("x".into()).name(), "error");
        assert_eq!(
            StreamEvent::Unknown {
                event: "session".into(),
                data: String::new()
            }
            .name(),
            "unknown"
        );
    }
}
