use std::fmt;

use rand::RngCore;

use super::AssessmentId;

const SUFFIX_BYTES: usize = 4;

/// Queue-level job handle, rendered as `grading_{assessment_id}_{8 hex}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GradingJobId(String);

impl GradingJobId {
    pub fn generate(assessment_id: &AssessmentId) -> Self {
        let mut suffix = [0u8; SUFFIX_BYTES];
        rand::thread_rng().fill_bytes(&mut suffix);
        let hex: String = suffix.iter().map(|b| format!("{:02x}", b)).collect();
        Self(format!("grading_{}_{}", assessment_id.as_str(), hex))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GradingJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
