#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("assessment id must not be empty")]
    EmptyAssessmentId,
    #[error("assessment id must be at most {0} characters")]
    AssessmentIdTooLong(usize),
    #[error("assessment id contains unsupported character {0:?}; allowed: letters, digits, '.', '_', '-'")]
    InvalidAssessmentIdChar(char),
    #[error("transcript must not be empty")]
    EmptyTranscript,
    #[error("invalid job status: {0}")]
    InvalidJobStatus(String),
}
