use std::sync::Arc;

use validator::Validate;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{AssessmentId, GradingReport, MAX_BAND, MIN_BAND};

const EXAMINER_PROMPT: &str = "You are a professional IELTS examiner. \
Grade the transcript based on official IELTS speaking criteria. \
Respond with a single JSON object and nothing else.";

/// Produces a validated `GradingReport` for one transcript.
pub struct GradingService {
    llm_client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl GradingService {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self {
            llm_client,
            system_prompt: examiner_system_prompt(),
        }
    }

    pub async fn grade(
        &self,
        assessment_id: &AssessmentId,
        transcript: &str,
    ) -> Result<GradingReport, GradingError> {
        let user_prompt = format!("Assess this transcript: {}", transcript);

        let raw = self
            .llm_client
            .complete(&self.system_prompt, &user_prompt)
            .await
            .map_err(GradingError::Llm)?;

        tracing::debug!(chars = raw.len(), "Grading model responded");

        parse_report(&raw, assessment_id)
    }
}

/// Parses raw model output into a report bound to `assessment_id`.
///
/// Model output is untrusted: the JSON shape and every band score are
/// checked after parsing.
pub fn parse_report(
    raw: &str,
    assessment_id: &AssessmentId,
) -> Result<GradingReport, GradingError> {
    let body = strip_code_fence(raw);

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GradingError::MalformedJson(e.to_string()))?;

    let mut report: GradingReport = serde_json::from_value(value)
        .map_err(|e| GradingError::SchemaValidation(e.to_string()))?;

    report.assessment_id = assessment_id.as_str().to_string();

    report
        .validate()
        .map_err(|e| GradingError::SchemaValidation(e.to_string()))?;

    Ok(report)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn examiner_system_prompt() -> String {
    format!(
        r#"{EXAMINER_PROMPT}
The object must have exactly this shape:
{{
  "assessment_id": string,
  "overall_band": number,
  "detailed_scores": {{
    "fluency_and_coherence": number,
    "lexical_resource": number,
    "grammatical_range_and_accuracy": number,
    "pronunciation": number
  }},
  "ai_feedback": {{
    "strengths": [string],
    "weaknesses": [string],
    "improved_transcript": string
  }}
}}
Every score is a band between {MIN_BAND:.1} and {MAX_BAND:.1} inclusive, in steps of 0.5."#
    )
}

#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error("grading model: {0}")]
    Llm(LlmClientError),
    #[error("malformed report json: {0}")]
    MalformedJson(String),
    #[error("report failed schema validation: {0}")]
    SchemaValidation(String),
}
