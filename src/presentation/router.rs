use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    grade_handler, health_handler, job_status_handler, transcribe_and_grade_handler,
};
use crate::presentation::state::{GradingState, IntakeState};

/// Public audio intake API.
pub fn create_intake_router(state: IntakeState) -> Router {
    let body_limit = state.max_upload_bytes;

    let router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/transcribe-and-grade",
            post(transcribe_and_grade_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/jobs/{job_id}", get(job_status_handler))
        .with_state(state);

    with_common_layers(router)
}

/// Internal grading API, reached by the intake service.
pub fn create_grading_router(state: GradingState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/internal/v1/grade", post(grade_handler))
        .route("/internal/v1/jobs/{job_id}", get(job_status_handler))
        .with_state(state);

    with_common_layers(router)
}

fn with_common_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
}
