use super::{AssessmentId, DomainError};

/// Text produced by the transcription stage, owned by one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub assessment_id: AssessmentId,
    pub text: String,
}

impl Transcript {
    pub fn new(assessment_id: AssessmentId, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyTranscript);
        }
        Ok(Self {
            assessment_id,
            text,
        })
    }
}
