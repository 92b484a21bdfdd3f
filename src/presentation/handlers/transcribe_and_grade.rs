use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::Submission;
use crate::domain::{AssessmentId, AudioFormat};
use crate::presentation::state::IntakeState;

use super::error_response::error_response;

pub const DEFAULT_USER_ID: &str = "test_user";
pub const QUEUED_MESSAGE: &str = "Your speaking is being assessed. Check back later!";

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct GradedResponse {
    pub status: &'static str,
    pub transcription: String,
    pub grading: serde_json::Value,
}

#[derive(Serialize)]
pub struct QueuedResponse {
    pub status: &'static str,
    pub job_id: String,
    pub message: &'static str,
}

struct AudioUpload {
    data: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
}

/// Multipart with a `file` part; `user_id` comes from the query string or a
/// form field.
#[tracing::instrument(skip(state, params, multipart))]
pub async fn transcribe_and_grade_handler(
    State(state): State<IntakeState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    let mut form_user_id = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return error_response(e.status(), format!("Failed to read file: {}", e));
                    }
                };
                upload = Some(AudioUpload {
                    data,
                    filename,
                    content_type,
                });
            }
            "user_id" => match field.text().await {
                Ok(text) => form_user_id = Some(text),
                Err(e) => {
                    return error_response(e.status(), format!("Failed to read user_id: {}", e));
                }
            },
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let Some(upload) = upload else {
        tracing::warn!("Upload request with no file");
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };
    if upload.data.is_empty() {
        tracing::warn!("Upload request with an empty file");
        return error_response(StatusCode::BAD_REQUEST, "Uploaded file is empty");
    }

    let raw_user_id = params
        .user_id
        .or(form_user_id)
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let assessment_id = match AssessmentId::parse(raw_user_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid user_id: {}", e)),
    };

    let format = AudioFormat::detect(upload.content_type.as_deref(), upload.filename.as_deref())
        .unwrap_or(state.default_format);

    tracing::info!(
        assessment_id = %assessment_id,
        filename = upload.filename.as_deref().unwrap_or("unknown"),
        format = %format,
        bytes = upload.data.len(),
        "Received audio upload"
    );

    match state
        .intake_service
        .process(assessment_id, &upload.data, format)
        .await
    {
        Ok(outcome) => match outcome.submission {
            Submission::Forwarded { acknowledgment } => (
                StatusCode::OK,
                Json(GradedResponse {
                    status: "success",
                    transcription: outcome.transcript.text,
                    grading: acknowledgment,
                }),
            )
                .into_response(),
            Submission::Queued { job_id } => {
                tracing::info!(job_id = %job_id, "Grading job queued");
                (
                    StatusCode::OK,
                    Json(QueuedResponse {
                        status: "queued",
                        job_id: job_id.to_string(),
                        message: QUEUED_MESSAGE,
                    }),
                )
                    .into_response()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Intake pipeline failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
