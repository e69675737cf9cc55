// cardgen: orchestration core — SSE demultiplexer, stream state machine,
// and the four-mode request client.

mod batch;
pub mod client;
pub mod machine;
pub mod sse;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// --- Curated re-exports from cardgen-types ---
// Intentional surface rather than a blanket `pub use cardgen_types::*`.
pub use cardgen_types::{
    BatchFailure, BatchOutcome, BoxFuture, BoxStream, CardEnvelope, ClientConfig, Error, ErrorKind,
    GenerationRequest, GenerationResult, StreamEvent, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT,
};

pub use client::{CardClient, CardClientBuilder};
pub use machine::{StreamMachine, StreamState, CLOSED_WITHOUT_TERMINAL};
