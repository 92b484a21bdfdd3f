mod grading_dispatcher;
mod grading_service;
mod grading_worker;
mod intake_service;
mod queue_job_submitter;

pub use grading_dispatcher::GradingDispatcher;
pub use grading_service::{GradingError, GradingService, parse_report};
pub use grading_worker::GradingWorker;
pub use intake_service::{IntakeError, IntakeOutcome, IntakeService};
pub use queue_job_submitter::QueueJobSubmitter;
