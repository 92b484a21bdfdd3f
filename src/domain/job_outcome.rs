use serde::{Deserialize, Serialize};

use super::GradingReport;

/// Result recorded on a finished job: the report itself, or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobOutcome {
    Report(GradingReport),
    Error { error: String },
}

impl JobOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, JobOutcome::Report(_))
    }
}
