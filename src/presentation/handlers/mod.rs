mod error_response;
mod grade;
mod health;
mod job_status;
mod transcribe_and_grade;

pub use error_response::{ErrorResponse, error_response};
pub use grade::{GRADING_STARTED_MESSAGE, GradeAccepted, GradeRequest, grade_handler};
pub use health::health_handler;
pub use job_status::{JobStatusResponse, job_status_handler};
pub use transcribe_and_grade::{
    DEFAULT_USER_ID, QUEUED_MESSAGE, UploadParams, transcribe_and_grade_handler,
};
