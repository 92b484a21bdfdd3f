mod assessment_id;
mod audio_format;
mod domain_error;
mod grading_job;
mod grading_job_id;
mod grading_report;
mod job_outcome;
mod job_status;
mod transcript;

pub use assessment_id::{AssessmentId, MAX_ASSESSMENT_ID_LEN};
pub use audio_format::AudioFormat;
pub use domain_error::DomainError;
pub use grading_job::GradingJob;
pub use grading_job_id::GradingJobId;
pub use grading_report::{AiFeedback, DetailedScores, GradingReport, MAX_BAND, MIN_BAND};
pub use job_outcome::JobOutcome;
pub use job_status::JobStatus;
pub use transcript::Transcript;
