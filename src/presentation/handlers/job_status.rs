use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{GradingJobId, JobOutcome};
use crate::presentation::state::JobLookup;

use super::error_response::error_response;

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub assessment_id: String,
    pub queue: String,
    pub status: &'static str,
    pub attempts: u32,
    pub result: Option<JobOutcome>,
    pub created_at: String,
    pub updated_at: String,
}

#[tracing::instrument(skip(lookup))]
pub async fn job_status_handler(
    State(lookup): State<JobLookup>,
    Path(job_id): Path<String>,
) -> Response {
    let JobLookup(Some(queue)) = lookup else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Job lookup is only available in queued submission mode",
        );
    };

    match queue.get(&GradingJobId::from_raw(job_id.clone())).await {
        Ok(Some(job)) => {
            let response = JobStatusResponse {
                job_id: job.id.to_string(),
                assessment_id: job.assessment_id.to_string(),
                queue: job.queue,
                status: job.status.as_str(),
                attempts: job.attempts,
                result: job.outcome,
                created_at: job.created_at.to_rfc3339(),
                updated_at: job.updated_at.to_rfc3339(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch job: {}", e),
            )
        }
    }
}
