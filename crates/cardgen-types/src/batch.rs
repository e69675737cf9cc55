// BatchOutcome — aggregate result of a multi-request run.

use crate::error::Error;
use crate::request::GenerationRequest;
use crate::response::GenerationResult;

/// One request that reached a failed terminal state, paired with its reason.
#[derive(Debug)]
pub struct BatchFailure {
    pub request: GenerationRequest,
    pub reason: Error,
}

/// Outcome of a batch run. Every input request lands in exactly one of the
/// two lists, so `succeeded.len() + failed.len()` always equals the input
/// length. Both lists preserve input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<GenerationResult>,
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, request: GenerationRequest, result: Result<GenerationResult, Error>) {
        match result {
            Ok(result) => self.succeeded.push(result),
            Err(reason) => self.failed.push(BatchFailure { request, reason }),
        }
    }

    /// Total number of requests that reached a terminal state.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
