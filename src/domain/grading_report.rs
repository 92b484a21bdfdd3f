use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_BAND: f64 = 0.0;
pub const MAX_BAND: f64 = 9.0;

/// Structured IELTS speaking assessment produced by the grading model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GradingReport {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub assessment_id: String,
    #[validate(range(min = 0.0, max = 9.0))]
    pub overall_band: f64,
    #[validate(nested)]
    pub detailed_scores: DetailedScores,
    pub ai_feedback: AiFeedback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DetailedScores {
    #[validate(range(min = 0.0, max = 9.0))]
    pub fluency_and_coherence: f64,
    #[validate(range(min = 0.0, max = 9.0))]
    pub lexical_resource: f64,
    #[validate(range(min = 0.0, max = 9.0))]
    pub grammatical_range_and_accuracy: f64,
    #[validate(range(min = 0.0, max = 9.0))]
    pub pronunciation: f64,
}

impl DetailedScores {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.fluency_and_coherence,
            self.lexical_resource,
            self.grammatical_range_and_accuracy,
            self.pronunciation,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improved_transcript: String,
}
