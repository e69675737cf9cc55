// SSE demultiplexer — wire frames in, typed StreamEvents out.

use cardgen_types::{Error, GenerationResult, StreamEvent};

/// One complete SSE record: the `event:` name (if any) and the joined
/// `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental frame decoder.
///
/// Feed raw chunks as they arrive off the wire; lines may span chunk
/// boundaries and both `\n` and `\r\n` endings are handled. A blank line
/// closes the current frame. Comment lines (`:` prefix) and fields other
/// than `event:` / `data:` are dropped, per the SSE spec.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: String,
    event: Option<String>,
    data_lines: Vec<String>,
    saw_field: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk, returning every frame it completed.
    pub fn feed(&mut self, chunk: &str) -> Vec<SseFrame> {
        self.pending.push_str(chunk);
        let mut frames = Vec::new();

        while let Some(pos) = self.pending.find('\n') {
            let mut line: String = self.pending.drain(..=pos).collect();
            line.pop(); // the '\n'
            if line.ends_with('\r') {
                line.pop();
            }

            if line.is_empty() {
                if let Some(frame) = self.close_frame() {
                    frames.push(frame);
                }
            } else {
                self.field(&line);
            }
        }

        frames
    }

    fn field(&mut self, line: &str) {
        if line.starts_with(':') {
            return; // comment / keep-alive
        }
        let (name, value) = match line.find(':') {
            Some(pos) => (&line[..pos], &line[pos + 1..]),
            None => return, // field-less lines carry nothing we use
        };
        let value = value.strip_prefix(' ').unwrap_or(value);

        match name {
            "event" => {
                self.event = Some(value.to_string());
                self.saw_field = true;
            }
            "data" => {
                self.data_lines.push(value.to_string());
                self.saw_field = true;
            }
            _ => {}
        }
    }

    fn close_frame(&mut self) -> Option<SseFrame> {
        if !self.saw_field {
            return None;
        }
        let frame = SseFrame {
            event: self.event.take(),
            data: self.data_lines.join("\n"),
        };
        self.data_lines.clear();
        self.saw_field = false;
        Some(frame)
    }
}

/// Map a wire frame to a typed event.
///
/// Returns `Ok(None)` for frames with no event name (comments already got
/// dropped upstream; this covers bare `data:` keep-alives). Unrecognized
/// event names become `StreamEvent::Unknown` so callers can observe
/// forward-compatible traffic. A payload that fails to parse where JSON is
/// required yields `ErrorKind::MalformedEvent`; whether that aborts the
/// stream depends on the caller (only terminal records are fatal).
pub fn decode_frame(frame: &SseFrame) -> Result<Option<StreamEvent>, Error> {
    let event = match frame.event.as_deref() {
        Some(name) => name,
        None => return Ok(None),
    };

    match event {
        "output" => {
            let value: serde_json::Value = serde_json::from_str(&frame.data)
                .map_err(|e| Error::malformed_event(event, e.to_string()))?;
            let text = value
                .get("data")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::malformed_event(event, "missing 'data' text field"))?;
            Ok(Some(StreamEvent::Output(text.to_string())))
        }
        "status" => {
            let value: serde_json::Value = serde_json::from_str(&frame.data)
                .map_err(|e| Error::malformed_event(event, e.to_string()))?;
            match value {
                serde_json::Value::Object(map) => Ok(Some(StreamEvent::Status(map))),
                _ => Err(Error::malformed_event(event, "expected JSON object")),
            }
        }
        "completed" => {
            let result: GenerationResult = serde_json::from_str(&frame.data)
                .map_err(|e| Error::malformed_event(event, e.to_string()))?;
            Ok(Some(StreamEvent::Completed(result)))
        }
        "error" => {
            let value: serde_json::Value = serde_json::from_str(&frame.data)
                .map_err(|e| Error::malformed_event(event, e.to_string()))?;
            let message = value
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| value.to_string());
            Ok(Some(StreamEvent::Error(message)))
        }
        _ => Ok(Some(StreamEvent::Unknown {
            event: event.to_string(),
            data: frame.data.clone(),
        })),
    }
}

/// Whether a wire event name marks the end of a stream. Used to decide if a
/// malformed record aborts the stream or is merely skipped.
pub fn is_terminal_event_name(event: &str) -> bool {
    matches!(event, "completed" | "error")
}
