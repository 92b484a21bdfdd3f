mod job_queue;
mod job_submitter;
mod llm_client;
mod transcription_engine;

pub use job_queue::{JobQueue, QueueError};
pub use job_submitter::{JobSubmitter, Submission, SubmissionError};
pub use llm_client::{LlmClient, LlmClientError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
