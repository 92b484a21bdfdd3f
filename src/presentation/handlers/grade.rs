use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{AssessmentId, Transcript};
use crate::presentation::state::GradingState;

use super::error_response::error_response;

pub const GRADING_STARTED_MESSAGE: &str = "Grading process started";

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    #[validate(length(min = 1, max = 128))]
    pub assessment_id: String,
    #[validate(length(min = 1))]
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct GradeAccepted {
    pub message: &'static str,
    pub assessment_id: String,
    pub job_id: String,
}

/// Validates the payload and queues grading; answers 202 before any
/// grading happens. Nothing is enqueued for a rejected payload.
#[tracing::instrument(skip(state, payload))]
pub async fn grade_handler(
    State(state): State<GradingState>,
    payload: Result<Json<GradeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected grading payload");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    if let Err(e) = request.validate() {
        tracing::warn!(error = %e, "Grading payload failed validation");
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid grading request: {}", e),
        );
    }

    let transcript = match AssessmentId::parse(request.assessment_id)
        .and_then(|id| Transcript::new(id, request.transcript))
    {
        Ok(transcript) => transcript,
        Err(e) => {
            tracing::warn!(error = %e, "Grading payload failed validation");
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid grading request: {}", e),
            );
        }
    };

    match state.dispatcher.schedule(&transcript).await {
        Ok(job_id) => (
            StatusCode::ACCEPTED,
            Json(GradeAccepted {
                message: GRADING_STARTED_MESSAGE,
                assessment_id: transcript.assessment_id.to_string(),
                job_id: job_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to schedule grading job");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Failed to schedule grading: {}", e),
            )
        }
    }
}
