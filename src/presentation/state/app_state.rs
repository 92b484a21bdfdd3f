use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::ports::JobQueue;
use crate::application::services::{GradingDispatcher, IntakeService};
use crate::domain::AudioFormat;

/// State of the intake service (`/transcribe-and-grade`).
#[derive(Clone)]
pub struct IntakeState {
    pub intake_service: Arc<IntakeService>,
    /// Present in queued submission mode, where job handles can be looked up.
    pub job_queue: Option<Arc<dyn JobQueue>>,
    pub default_format: AudioFormat,
    pub max_upload_bytes: usize,
}

/// State of the grading service (`/internal/v1/grade`).
#[derive(Clone)]
pub struct GradingState {
    pub dispatcher: Arc<GradingDispatcher>,
}

/// Read access to job records, shared by both services' status routes.
#[derive(Clone)]
pub struct JobLookup(pub Option<Arc<dyn JobQueue>>);

impl FromRef<IntakeState> for JobLookup {
    fn from_ref(state: &IntakeState) -> Self {
        Self(state.job_queue.clone())
    }
}

impl FromRef<GradingState> for JobLookup {
    fn from_ref(state: &GradingState) -> Self {
        Self(Some(Arc::clone(state.dispatcher.queue())))
    }
}
