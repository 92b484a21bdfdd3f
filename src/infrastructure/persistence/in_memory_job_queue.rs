use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{GradingJob, GradingJobId, JobOutcome, JobStatus};

pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(3600);

/// Process-local queue. Jobs do not survive a restart.
///
/// Finished jobs stay readable for `result_ttl` after their last update and
/// are dropped by the next `requeue_stale` sweep once that has passed.
pub struct InMemoryJobQueue {
    name: String,
    result_ttl: Duration,
    state: Mutex<QueueState>,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<GradingJobId>,
    jobs: HashMap<GradingJobId, GradingJob>,
}

impl InMemoryJobQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result_ttl: DEFAULT_RESULT_TTL,
            state: Mutex::new(QueueState::default()),
        }
    }

    pub fn with_result_ttl(mut self, result_ttl: Duration) -> Self {
        self.result_ttl = result_ttl;
        self
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn pending(&self) -> usize {
        self.state.lock().await.pending.len()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enqueue(&self, job: &GradingJob) -> Result<(), QueueError> {
        let mut state = self.state.lock().await;
        if state.jobs.contains_key(&job.id) {
            return Err(QueueError::DuplicateJob(job.id.to_string()));
        }
        state.pending.push_back(job.id.clone());
        state.jobs.insert(job.id.clone(), job.clone());
        Ok(())
    }

    async fn claim_next(&self) -> Result<Option<GradingJob>, QueueError> {
        let mut state = self.state.lock().await;

        while let Some(id) = state.pending.pop_front() {
            let Some(job) = state.jobs.get_mut(&id) else {
                continue;
            };
            if job.status != JobStatus::Queued {
                continue;
            }
            job.mark_claimed(Utc::now());
            return Ok(Some(job.clone()));
        }

        Ok(None)
    }

    async fn complete(&self, id: &GradingJobId, outcome: &JobOutcome) -> Result<(), QueueError> {
        let mut state = self.state.lock().await;
        let job = state
            .jobs
            .get_mut(id)
            .ok_or_else(|| QueueError::NotFound(id.to_string()))?;
        job.mark_finished(outcome.clone(), Utc::now());
        Ok(())
    }

    async fn get(&self, id: &GradingJobId) -> Result<Option<GradingJob>, QueueError> {
        Ok(self.state.lock().await.jobs.get(id).cloned())
    }

    async fn requeue_stale(&self, visibility_timeout: Duration) -> Result<u64, QueueError> {
        let timeout = chrono::Duration::from_std(visibility_timeout)
            .map_err(|e| QueueError::QueryFailed(format!("visibility timeout: {}", e)))?;
        let result_ttl = chrono::Duration::from_std(self.result_ttl)
            .map_err(|e| QueueError::QueryFailed(format!("result ttl: {}", e)))?;
        let now = Utc::now();
        let cutoff = now - timeout;
        let expiry = now - result_ttl;

        let mut state = self.state.lock().await;
        let QueueState { pending, jobs } = &mut *state;

        let before = jobs.len();
        jobs.retain(|_, job| !(job.status.is_terminal() && job.updated_at < expiry));
        let evicted = before - jobs.len();
        if evicted > 0 {
            tracing::debug!(queue = %self.name, evicted, "Evicted expired job results");
        }

        let mut requeued = 0;
        for job in jobs.values_mut() {
            let expired = job.status == JobStatus::Processing
                && job.claimed_at.is_some_and(|claimed| claimed < cutoff);
            if expired {
                job.mark_requeued(now);
                pending.push_back(job.id.clone());
                requeued += 1;
            }
        }

        Ok(requeued)
    }
}
