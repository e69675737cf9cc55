// CardClient — the request orchestrator over one shared HTTP handle.

use std::time::Duration;

use futures::StreamExt;

use cardgen_types::{
    BoxStream, CardEnvelope, ClientConfig, Error, GenerationRequest, GenerationResult, StreamEvent,
};

use crate::machine::StreamMachine;
use crate::sse::{decode_frame, is_terminal_event_name, SseDecoder};

/// Client for the card generation service.
///
/// Holds one `reqwest::Client` (connection pool included) shared across all
/// operations; each request still gets its own connection-level state, and
/// nothing here is process-global.
#[derive(Debug)]
pub struct CardClient {
    http: reqwest::Client,
    config: ClientConfig,
}

/// Builder for a [`CardClient`].
pub struct CardClientBuilder {
    config: ClientConfig,
}

impl CardClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Start from an existing configuration (e.g. `ClientConfig::from_env()`).
    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Default deadline for buffered requests; per-request timeouts override it.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Per-chunk read deadline on streaming responses.
    pub fn stream_read_timeout(mut self, timeout: Duration) -> Self {
        self.config.stream_read_timeout = timeout;
        self
    }

    /// Pause between consecutive sequential-batch requests.
    pub fn batch_delay(mut self, delay: Duration) -> Self {
        self.config.batch_delay = delay;
        self
    }

    /// Cap on simultaneous in-flight concurrent-batch requests.
    pub fn max_concurrency(mut self, cap: usize) -> Self {
        self.config.max_concurrency = cap;
        self
    }

    pub fn build(mut self) -> Result<CardClient, Error> {
        if self.config.base_url.trim().is_empty() {
            return Err(Error::configuration("base URL must not be empty"));
        }
        if self.config.max_concurrency == 0 {
            return Err(Error::configuration("max_concurrency must be at least 1"));
        }
        // Trailing slashes would double up when joining paths.
        while self.config.base_url.ends_with('/') {
            self.config.base_url.pop();
        }

        let http = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .build()
            .map_err(|e| Error::transport("failed to build HTTP client", e))?;

        Ok(CardClient {
            http,
            config: self.config,
        })
    }
}

impl Default for CardClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CardClient {
    pub fn builder() -> CardClientBuilder {
        CardClientBuilder::new()
    }

    /// Build a client from `CARDGEN_*` environment variables, with defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, Error> {
        CardClientBuilder::with_config(ClientConfig::from_env()).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One buffered generation: POST, wait for the full response.
    ///
    /// The deadline is the request's own timeout when set, otherwise the
    /// configured `request_timeout`. Fails with `Timeout` when that deadline
    /// passes, `Service` on a non-2xx status, `Application` when the service
    /// flags the generation as failed, and `Transport` on connection-level
    /// trouble.
    pub async fn generate_once(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, Error> {
        let url = format!("{}/api/generate/card", self.config.base_url);
        let deadline = request.timeout.unwrap_or(self.config.request_timeout);
        tracing::debug!(topic = %request.topic, template = %request.template, "generate_once");

        let response = self
            .http
            .post(&url)
            .json(request)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| classify_send_error(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::service(
                status.as_u16(),
                format!("generation request rejected: {}", truncate(&detail, 200)),
            ));
        }

        let envelope: CardEnvelope = response
            .json()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {e}"), e))?;

        if !envelope.success {
            return Err(Error::application(
                envelope
                    .message
                    .unwrap_or_else(|| "generation failed without a message".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| Error::application("success response carried no data"))
    }

    /// One streaming generation: POST with `Accept: text/event-stream`, then
    /// a lazy sequence of typed events.
    ///
    /// The sequence ends once the state machine reaches a terminal state; a
    /// connection that closes earlier yields a final synthesized
    /// `StreamEvent::Error` (silent close is failure, never success).
    /// Malformed non-terminal records are logged and skipped; a malformed
    /// terminal record ends the stream with `Err`. Dropping the stream
    /// before the end closes the connection and delivers nothing further.
    pub fn generate_streaming(
        &self,
        request: GenerationRequest,
    ) -> BoxStream<'_, Result<StreamEvent, Error>> {
        let stream = async_stream::stream! {
            let url = format!("{}/api/generate/card/stream", self.config.base_url);
            let deadline = request.timeout.unwrap_or(self.config.request_timeout);
            tracing::debug!(topic = %request.topic, "generate_streaming");

            // The deadline bounds connect + response headers only; once the
            // body starts, stream_read_timeout governs each chunk instead.
            let send = self
                .http
                .post(&url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .json(&request)
                .send();
            let response = match tokio::time::timeout(deadline, send).await {
                Ok(Ok(resp)) => resp,
                Ok(Err(e)) => {
                    yield Err(classify_send_error(e, self.config.connect_timeout));
                    return;
                }
                Err(_elapsed) => {
                    yield Err(Error::timeout(format!("no response within {deadline:?}")));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                yield Err(Error::service(
                    status.as_u16(),
                    format!("stream request rejected: {}", truncate(&detail, 200)),
                ));
                return;
            }

            let mut decoder = SseDecoder::new();
            let mut machine = StreamMachine::new();
            let mut chunks = response.bytes_stream();
            // Multi-byte UTF-8 sequences can straddle chunk boundaries.
            let mut utf8_remainder: Vec<u8> = Vec::new();

            'read: loop {
                let next = tokio::time::timeout(self.config.stream_read_timeout, chunks.next()).await;
                let chunk = match next {
                    Ok(Some(Ok(bytes))) => bytes,
                    Ok(Some(Err(e))) => {
                        yield Err(Error::transport(format!("stream read error: {e}"), e));
                        return;
                    }
                    Ok(None) => break 'read, // connection closed
                    Err(_elapsed) => {
                        yield Err(Error::timeout(format!(
                            "no stream data within {:?}",
                            self.config.stream_read_timeout
                        )));
                        return;
                    }
                };

                let buffered = if utf8_remainder.is_empty() {
                    chunk.to_vec()
                } else {
                    let mut joined = std::mem::take(&mut utf8_remainder);
                    joined.extend_from_slice(&chunk);
                    joined
                };
                let text = match std::str::from_utf8(&buffered) {
                    Ok(s) => s.to_string(),
                    Err(e) => {
                        let valid = e.valid_up_to();
                        utf8_remainder = buffered[valid..].to_vec();
                        if valid == 0 {
                            continue 'read;
                        }
                        String::from_utf8_lossy(&buffered[..valid]).into_owned()
                    }
                };

                for frame in decoder.feed(&text) {
                    let event = match decode_frame(&frame) {
                        Ok(Some(event)) => event,
                        Ok(None) => continue,
                        Err(e) => {
                            let name = frame.event.as_deref().unwrap_or("");
                            if is_terminal_event_name(name) {
                                // The terminal boundary itself is unreadable;
                                // nothing meaningful can follow.
                                yield Err(e);
                                return;
                            }
                            tracing::warn!(event = name, error = %e, "skipping malformed SSE record");
                            continue;
                        }
                    };

                    if machine.observe(&event) {
                        let terminal = event.is_terminal();
                        yield Ok(event);
                        if terminal {
                            return;
                        }
                    }
                }
            }

            if let Some(event) = machine.finish_on_close() {
                yield Ok(event);
            }
        };
        Box::pin(stream)
    }

    /// Advisory health probe: any 2xx on `GET /health` is healthy, anything
    /// else (including transport failure) is not. Never raises.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }
}

fn classify_send_error(error: reqwest::Error, deadline: Duration) -> Error {
    if error.is_timeout() {
        Error::timeout(format!("no response within {deadline:?}"))
    } else {
        Error::transport(format!("request failed: {error}"), error)
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
