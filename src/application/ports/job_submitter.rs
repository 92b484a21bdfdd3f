use async_trait::async_trait;

use crate::domain::{GradingJobId, Transcript};

use super::QueueError;

/// Hands a finished transcript to the grading stage.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, transcript: &Transcript) -> Result<Submission, SubmissionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The grading service acknowledged the transcript; its body is passed
    /// through untouched.
    Forwarded { acknowledgment: serde_json::Value },
    /// The transcript sits on the queue under this handle.
    Queued { job_id: GradingJobId },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("grading service error: {0}")]
    GradingService(String),
    #[error("grading service timed out after {0}s")]
    GradingTimeout(u64),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
