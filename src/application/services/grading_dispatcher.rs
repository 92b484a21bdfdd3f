use std::sync::Arc;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{GradingJob, GradingJobId, Transcript};

/// Turns a transcript into a queued grading job without waiting for it.
pub struct GradingDispatcher {
    queue: Arc<dyn JobQueue>,
}

impl GradingDispatcher {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    #[tracing::instrument(skip(self, transcript), fields(assessment_id = %transcript.assessment_id))]
    pub async fn schedule(&self, transcript: &Transcript) -> Result<GradingJobId, QueueError> {
        let job = GradingJob::new(self.queue.name(), transcript);
        self.queue.enqueue(&job).await?;

        tracing::info!(job_id = %job.id, queue = %job.queue, "Grading job enqueued");

        Ok(job.id)
    }

    pub fn queue(&self) -> &Arc<dyn JobQueue> {
        &self.queue
    }
}
