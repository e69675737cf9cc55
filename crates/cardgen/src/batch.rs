// Batch orchestration — sequential and bounded-concurrent fan-out.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use cardgen_types::{BatchOutcome, Error, GenerationRequest};

use crate::client::CardClient;

impl CardClient {
    /// Run requests one at a time, in input order, pausing `batch_delay`
    /// between consecutive requests to stay friendly to the service.
    ///
    /// Partial-failure tolerant: a failed request is recorded and the batch
    /// moves on. Both `succeeded` and `failed` preserve input order.
    pub async fn generate_batch_sequential(
        &self,
        requests: Vec<GenerationRequest>,
    ) -> BatchOutcome {
        let total = requests.len();
        let mut outcome = BatchOutcome::new();

        for (index, request) in requests.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config().batch_delay).await;
            }
            tracing::debug!(index, total, topic = %request.topic, "sequential batch item");
            let result = self.generate_once(&request).await;
            if let Err(reason) = &result {
                tracing::warn!(topic = %request.topic, error = %reason, "batch item failed");
            }
            outcome.record(request, result);
        }

        outcome
    }

    /// Launch all requests as independent tasks and wait for every one of
    /// them to reach a terminal state (join-all, never first-failure-wins).
    ///
    /// In-flight work is capped by `max_concurrency`; a slow or failing
    /// request never cancels its siblings. Both `succeeded` and `failed`
    /// preserve input order.
    pub async fn generate_batch_concurrent(
        &self,
        requests: Vec<GenerationRequest>,
    ) -> BatchOutcome {
        let limiter = Arc::new(Semaphore::new(self.config().max_concurrency));

        let tasks = requests.into_iter().map(|request| {
            let limiter = Arc::clone(&limiter);
            async move {
                let permit = match limiter.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        // Semaphore lives for the whole join; closure is unreachable.
                        return (
                            request,
                            Err(Error::configuration("concurrency limiter closed")),
                        );
                    }
                };
                let result = self.generate_once(&request).await;
                drop(permit);
                (request, result)
            }
        });

        let mut outcome = BatchOutcome::new();
        for (request, result) in join_all(tasks).await {
            if let Err(reason) = &result {
                tracing::warn!(topic = %request.topic, error = %reason, "batch item failed");
            }
            outcome.record(request, result);
        }
        outcome
    }
}
