// Client configuration — all knobs the orchestrator honors.

use std::time::Duration;

/// Where the service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8082";

/// Default deadline for buffered requests. Generation routinely takes
/// minutes, so the original client shipped with a 3-minute timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Configuration for a `CardClient`.
///
/// Every field can be overridden by the builder or, via [`from_env`],
/// by `CARDGEN_*` environment variables.
///
/// [`from_env`]: ClientConfig::from_env
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Default deadline for buffered requests; a `GenerationRequest` timeout
    /// takes precedence for its own call.
    pub request_timeout: Duration,
    /// Per-chunk read deadline on streaming responses.
    pub stream_read_timeout: Duration,
    /// Pause between consecutive requests in a sequential batch.
    pub batch_delay: Duration,
    /// Cap on simultaneous in-flight requests in a concurrent batch.
    pub max_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stream_read_timeout: Duration::from_secs(30),
            batch_delay: Duration::from_secs(1),
            max_concurrency: 8,
        }
    }
}

impl ClientConfig {
    /// Read overrides from the environment, falling back to defaults for any
    /// unset or unparseable value. Durations are given in seconds.
    ///
    /// Recognized variables: `CARDGEN_BASE_URL`, `CARDGEN_CONNECT_TIMEOUT`,
    /// `CARDGEN_REQUEST_TIMEOUT`, `CARDGEN_STREAM_READ_TIMEOUT`,
    /// `CARDGEN_BATCH_DELAY`, `CARDGEN_MAX_CONCURRENCY`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("CARDGEN_BASE_URL").unwrap_or(defaults.base_url),
            connect_timeout: env_secs("CARDGEN_CONNECT_TIMEOUT")
                .unwrap_or(defaults.connect_timeout),
            request_timeout: env_secs("CARDGEN_REQUEST_TIMEOUT")
                .unwrap_or(defaults.request_timeout),
            stream_read_timeout: env_secs("CARDGEN_STREAM_READ_TIMEOUT")
                .unwrap_or(defaults.stream_read_timeout),
            batch_delay: env_secs("CARDGEN_BATCH_DELAY").unwrap_or(defaults.batch_delay),
            max_concurrency: std::env::var("CARDGEN_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_concurrency),
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    let secs = std::env::var(name).ok()?.parse::<f64>().ok()?;
    if secs > 0.0 && secs.is_finite() {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
