use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{JobSubmitter, Submission, SubmissionError};
use crate::domain::Transcript;

use super::GradingDispatcher;

/// Queued strategy: enqueue and return the job handle immediately.
pub struct QueueJobSubmitter {
    dispatcher: Arc<GradingDispatcher>,
}

impl QueueJobSubmitter {
    pub fn new(dispatcher: Arc<GradingDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl JobSubmitter for QueueJobSubmitter {
    async fn submit(&self, transcript: &Transcript) -> Result<Submission, SubmissionError> {
        let job_id = self.dispatcher.schedule(transcript).await?;
        Ok(Submission::Queued { job_id })
    }
}
