mod http_job_submitter;
mod job_submitter_factory;

pub use http_job_submitter::HttpJobSubmitter;
pub use job_submitter_factory::{JobSubmitterFactory, JobSubmitterFactoryError};
