use std::sync::Arc;

use crate::application::ports::{
    JobSubmitter, Submission, SubmissionError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AssessmentId, AudioFormat, DomainError, Transcript};
use crate::infrastructure::observability::sanitize_for_log;

const TRANSCRIPT_LOG_CHARS: usize = 50;

pub struct IntakeOutcome {
    pub transcript: Transcript,
    pub submission: Submission,
}

/// Audio in, submitted transcript out. The submission strategy decides
/// whether grading is awaited or queued.
pub struct IntakeService {
    transcription_engine: Arc<dyn TranscriptionEngine>,
    job_submitter: Arc<dyn JobSubmitter>,
}

impl IntakeService {
    pub fn new(
        transcription_engine: Arc<dyn TranscriptionEngine>,
        job_submitter: Arc<dyn JobSubmitter>,
    ) -> Self {
        Self {
            transcription_engine,
            job_submitter,
        }
    }

    #[tracing::instrument(skip(self, audio_data), fields(bytes = audio_data.len()))]
    pub async fn process(
        &self,
        assessment_id: AssessmentId,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<IntakeOutcome, IntakeError> {
        tracing::debug!("Starting audio transcription");

        let text = self
            .transcription_engine
            .transcribe(audio_data, format)
            .await
            .map_err(IntakeError::Transcription)?;

        let transcript = Transcript::new(assessment_id, text).map_err(IntakeError::Transcript)?;

        tracing::info!(
            transcript = %sanitize_for_log(&transcript.text, TRANSCRIPT_LOG_CHARS),
            "Transcription completed"
        );

        let submission = self
            .job_submitter
            .submit(&transcript)
            .await
            .map_err(IntakeError::Submission)?;

        Ok(IntakeOutcome {
            transcript,
            submission,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
    #[error("transcript: {0}")]
    Transcript(DomainError),
    #[error("submission: {0}")]
    Submission(SubmissionError),
}
