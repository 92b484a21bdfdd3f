use std::sync::Arc;

use crate::application::ports::{JobQueue, JobSubmitter};
use crate::application::services::{GradingDispatcher, QueueJobSubmitter};
use crate::presentation::config::{IntakeSettings, SubmissionMode};

use super::HttpJobSubmitter;

#[derive(Debug, thiserror::Error)]
pub enum JobSubmitterFactoryError {
    #[error("queued submission mode requires a job queue")]
    MissingQueue,
}

pub struct JobSubmitterFactory;

impl JobSubmitterFactory {
    pub fn create(
        settings: &IntakeSettings,
        queue: Option<Arc<dyn JobQueue>>,
    ) -> Result<Arc<dyn JobSubmitter>, JobSubmitterFactoryError> {
        match settings.submission_mode {
            SubmissionMode::Sync => Ok(Arc::new(HttpJobSubmitter::new(
                &settings.grading_url,
                settings.grading_timeout(),
            ))),
            SubmissionMode::Queued => {
                let queue = queue.ok_or(JobSubmitterFactoryError::MissingQueue)?;
                let dispatcher = Arc::new(GradingDispatcher::new(queue));
                Ok(Arc::new(QueueJobSubmitter::new(dispatcher)))
            }
        }
    }
}
