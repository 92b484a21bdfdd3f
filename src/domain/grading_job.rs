use chrono::{DateTime, Utc};

use super::{AssessmentId, GradingJobId, JobOutcome, JobStatus, Transcript};

#[derive(Debug, Clone)]
pub struct GradingJob {
    pub id: GradingJobId,
    pub queue: String,
    pub assessment_id: AssessmentId,
    pub transcript: String,
    pub status: JobStatus,
    pub attempts: u32,
    pub outcome: Option<JobOutcome>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl GradingJob {
    pub fn new(queue: impl Into<String>, transcript: &Transcript) -> Self {
        let now = Utc::now();
        Self {
            id: GradingJobId::generate(&transcript.assessment_id),
            queue: queue.into(),
            assessment_id: transcript.assessment_id.clone(),
            transcript: transcript.text.clone(),
            status: JobStatus::Queued,
            attempts: 0,
            outcome: None,
            created_at: now,
            updated_at: now,
            claimed_at: None,
        }
    }

    pub(crate) fn mark_claimed(&mut self, at: DateTime<Utc>) {
        self.status = JobStatus::Processing;
        self.attempts += 1;
        self.claimed_at = Some(at);
        self.updated_at = at;
    }

    pub(crate) fn mark_finished(&mut self, outcome: JobOutcome, at: DateTime<Utc>) {
        self.status = if outcome.is_report() {
            JobStatus::Completed
        } else {
            JobStatus::Failed
        };
        self.outcome = Some(outcome);
        self.updated_at = at;
    }

    pub(crate) fn mark_requeued(&mut self, at: DateTime<Utc>) {
        self.status = JobStatus::Queued;
        self.claimed_at = None;
        self.updated_at = at;
    }
}
