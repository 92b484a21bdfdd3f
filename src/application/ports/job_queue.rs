use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{GradingJob, GradingJobId, JobOutcome};

/// Named, claim-based work queue for grading jobs.
///
/// A job is handed to at most one worker by `claim_next`. The worker
/// acknowledges it with `complete`; a job whose claim is older than the
/// visibility timeout is put back by `requeue_stale`, which gives
/// at-least-once delivery across worker crashes.
#[async_trait]
pub trait JobQueue: Send + Sync {
    fn name(&self) -> &str;

    async fn enqueue(&self, job: &GradingJob) -> Result<(), QueueError>;

    async fn claim_next(&self) -> Result<Option<GradingJob>, QueueError>;

    async fn complete(&self, id: &GradingJobId, outcome: &JobOutcome) -> Result<(), QueueError>;

    async fn get(&self, id: &GradingJobId) -> Result<Option<GradingJob>, QueueError>;

    async fn requeue_stale(&self, visibility_timeout: Duration) -> Result<u64, QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue connection failed: {0}")]
    ConnectionFailed(String),
    #[error("queue query failed: {0}")]
    QueryFailed(String),
    #[error("duplicate job id: {0}")]
    DuplicateJob(String),
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("corrupt job record: {0}")]
    Corrupt(String),
}
