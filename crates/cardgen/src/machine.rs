// Stream state machine — enforces event ordering and terminal semantics
// for one generation stream.

use cardgen_types::StreamEvent;

/// Failure reason synthesized when the connection ends mid-stream.
pub const CLOSED_WITHOUT_TERMINAL: &str = "stream closed without terminal event";

/// Lifecycle of a single stream. `Completed` and `Failed` are absorbing:
/// no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No event observed yet.
    Idle,
    /// At least one `Output` or `Status` seen, no terminal yet.
    Streaming,
    Completed,
    Failed,
}

/// Interprets the event sequence of one stream.
///
/// The caller feeds every decoded event through [`observe`] and only
/// delivers those it approves; events arriving after a terminal state are
/// ignored (and logged), which is what makes the terminal states provably
/// absorbing from the consumer's point of view.
///
/// [`observe`]: StreamMachine::observe
#[derive(Debug)]
pub struct StreamMachine {
    state: StreamState,
}

impl Default for StreamMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamMachine {
    pub fn new() -> Self {
        Self {
            state: StreamState::Idle,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, StreamState::Completed | StreamState::Failed)
    }

    /// Advance on one event. Returns whether the event should be delivered
    /// to the consumer. Delivery happens before the caller reads the next
    /// record, so consumers see progress in wire order.
    pub fn observe(&mut self, event: &StreamEvent) -> bool {
        if self.is_terminal() {
            tracing::warn!(event = event.name(), "event after terminal state ignored");
            return false;
        }

        match event {
            StreamEvent::Output(_) | StreamEvent::Status(_) => {
                self.state = StreamState::Streaming;
            }
            StreamEvent::Completed(_) => {
                self.state = StreamState::Completed;
            }
            StreamEvent::Error(_) => {
                self.state = StreamState::Failed;
            }
            // Unrecognized traffic is passed through but proves nothing
            // about the stream having started.
            StreamEvent::Unknown { .. } => {}
        }
        true
    }

    /// Handle the connection closing. A close before any terminal event is a
    /// failure, never an implicit success; the synthesized `Error` event
    /// carries the policy reason and must be delivered to the consumer.
    pub fn finish_on_close(&mut self) -> Option<StreamEvent> {
        if self.is_terminal() {
            return None;
        }
        self.state = StreamState::Failed;
        Some(StreamEvent::Error(CLOSED_WITHOUT_TERMINAL.to_string()))
    }
}
