use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{GradingJob, JobOutcome, JobStatus};
use crate::infrastructure::observability::sanitize_for_log;

use super::GradingService;

const TRANSCRIPT_LOG_CHARS: usize = 50;
/// A busy worker still sweeps stale claims after this many poll intervals.
const SWEEP_EVERY_POLLS: u32 = 20;

/// Pulls grading jobs off a queue and records their outcome, one job at a
/// time.
pub struct GradingWorker {
    name: String,
    queue: Arc<dyn JobQueue>,
    grading_service: Arc<GradingService>,
    poll_interval: Duration,
    visibility_timeout: Duration,
}

impl GradingWorker {
    pub fn new(
        name: impl Into<String>,
        queue: Arc<dyn JobQueue>,
        grading_service: Arc<GradingService>,
        poll_interval: Duration,
        visibility_timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            queue,
            grading_service,
            poll_interval,
            visibility_timeout,
        }
    }

    /// Runs until `shutdown` fires. A job already claimed is finished
    /// before the loop exits.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(worker = %self.name, queue = %self.queue.name(), "Grading worker started");

        let mut sweep = SweepTimer::new(self.poll_interval * SWEEP_EVERY_POLLS, Instant::now());

        while !shutdown.is_cancelled() {
            let result = self.process_next().await;
            let idle = matches!(result, Ok(None));
            if sweep.due(idle, Instant::now()) {
                self.requeue_stale().await;
            }

            match result {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => tracing::error!(worker = %self.name, error = %e, "Queue operation failed"),
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        tracing::info!(worker = %self.name, "Grading worker stopped");
    }

    /// Claims and grades one job. `Ok(None)` means the queue was empty.
    ///
    /// Grading failures never surface here: they become the job's
    /// `{"error": ..}` outcome. Only queue failures are returned.
    pub async fn process_next(&self) -> Result<Option<JobStatus>, QueueError> {
        let Some(job) = self.queue.claim_next().await? else {
            return Ok(None);
        };

        let span = tracing::info_span!(
            "grading_job",
            worker = %self.name,
            job_id = %job.id,
            assessment_id = %job.assessment_id,
            attempt = job.attempts,
        );

        async move {
            let outcome = self.grade(&job).await;
            let status = if outcome.is_report() {
                JobStatus::Completed
            } else {
                JobStatus::Failed
            };

            self.queue.complete(&job.id, &outcome).await?;
            tracing::debug!(status = %status, "Job status transition");

            Ok::<_, QueueError>(Some(status))
        }
        .instrument(span)
        .await
    }

    async fn grade(&self, job: &GradingJob) -> JobOutcome {
        tracing::info!(
            transcript = %sanitize_for_log(&job.transcript, TRANSCRIPT_LOG_CHARS),
            "Grading job claimed"
        );

        match self
            .grading_service
            .grade(&job.assessment_id, &job.transcript)
            .await
        {
            Ok(report) => {
                tracing::info!(overall_band = report.overall_band, "Grading report generated");
                JobOutcome::Report(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Grading failed");
                JobOutcome::error(e.to_string())
            }
        }
    }

    async fn requeue_stale(&self) {
        match self.queue.requeue_stale(self.visibility_timeout).await {
            Ok(0) => {}
            Ok(count) => {
                tracing::warn!(worker = %self.name, count, "Requeued jobs with expired claims")
            }
            Err(e) => tracing::error!(worker = %self.name, error = %e, "Stale job sweep failed"),
        }
    }
}

/// Decides when to sweep for stale claims: whenever the queue is idle, and
/// at least once per `interval` while it stays busy.
struct SweepTimer {
    interval: Duration,
    last: Instant,
}

impl SweepTimer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    fn due(&mut self, idle: bool, now: Instant) -> bool {
        if idle || now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
