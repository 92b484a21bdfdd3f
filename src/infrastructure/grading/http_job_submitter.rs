use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{JobSubmitter, Submission, SubmissionError};
use crate::domain::Transcript;

/// Synchronous strategy: posts the transcript to the grading service and
/// returns its acknowledgment.
pub struct HttpJobSubmitter {
    client: Client,
    grading_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct GradeRequestBody<'a> {
    assessment_id: &'a str,
    transcript: &'a str,
}

impl HttpJobSubmitter {
    pub fn new(grading_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            grading_url: grading_url.to_string(),
            timeout,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> SubmissionError {
        if e.is_timeout() {
            SubmissionError::GradingTimeout(self.timeout.as_secs())
        } else {
            SubmissionError::GradingService(format!("request: {}", e))
        }
    }
}

#[async_trait]
impl JobSubmitter for HttpJobSubmitter {
    #[tracing::instrument(skip(self, transcript), fields(assessment_id = %transcript.assessment_id, url = %self.grading_url))]
    async fn submit(&self, transcript: &Transcript) -> Result<Submission, SubmissionError> {
        let body = GradeRequestBody {
            assessment_id: transcript.assessment_id.as_str(),
            transcript: &transcript.text,
        };

        tracing::debug!("Forwarding transcript to grading service");

        let response = self
            .client
            .post(&self.grading_url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SubmissionError::GradingService(format!(
                "status {}: {}",
                status, body
            )));
        }

        let acknowledgment: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        tracing::info!(status = %status, "Grading service acknowledged transcript");

        Ok(Submission::Forwarded { acknowledgment })
    }
}
