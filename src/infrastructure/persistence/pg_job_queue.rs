use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{JobQueue, QueueError};
use crate::domain::{AssessmentId, GradingJob, GradingJobId, JobOutcome, JobStatus};

const JOB_COLUMNS: &str =
    "id, queue, assessment_id, transcript, status, attempts, result, created_at, updated_at, claimed_at";

/// Durable queue on a `grading_jobs` table. Claims use
/// `FOR UPDATE SKIP LOCKED`, so concurrent workers never share a job.
pub struct PgJobQueue {
    pool: PgPool,
    name: String,
}

impl PgJobQueue {
    pub fn new(pool: PgPool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: String,
    queue: String,
    assessment_id: String,
    transcript: String,
    status: String,
    attempts: i32,
    result: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    claimed_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for GradingJob {
    type Error = QueueError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(|e| QueueError::Corrupt(e.to_string()))?;
        let assessment_id = AssessmentId::parse(row.assessment_id)
            .map_err(|e| QueueError::Corrupt(e.to_string()))?;
        let outcome = row
            .result
            .map(serde_json::from_value::<JobOutcome>)
            .transpose()
            .map_err(|e| QueueError::Corrupt(format!("result: {}", e)))?;

        Ok(GradingJob {
            id: GradingJobId::from_raw(row.id),
            queue: row.queue,
            assessment_id,
            transcript: row.transcript,
            status,
            attempts: u32::try_from(row.attempts).unwrap_or_default(),
            outcome,
            created_at: row.created_at,
            updated_at: row.updated_at,
            claimed_at: row.claimed_at,
        })
    }
}

fn query_failed(e: sqlx::Error) -> QueueError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            QueueError::ConnectionFailed(e.to_string())
        }
        other => QueueError::QueryFailed(other.to_string()),
    }
}

#[async_trait]
impl JobQueue for PgJobQueue {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn enqueue(&self, job: &GradingJob) -> Result<(), QueueError> {
        let attempts = i32::try_from(job.attempts).unwrap_or(i32::MAX);

        sqlx::query(
            r#"
            INSERT INTO grading_jobs
                (id, queue, assessment_id, transcript, status, attempts, result, created_at, updated_at, claimed_at)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, $7, $8, NULL)
            "#,
        )
        .bind(job.id.as_str())
        .bind(&job.queue)
        .bind(job.assessment_id.as_str())
        .bind(&job.transcript)
        .bind(job.status.as_str())
        .bind(attempts)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                QueueError::DuplicateJob(job.id.to_string())
            }
            other => query_failed(other),
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(queue = %self.name))]
    async fn claim_next(&self) -> Result<Option<GradingJob>, QueueError> {
        let sql = format!(
            r#"
            UPDATE grading_jobs
            SET status = $2, attempts = attempts + 1, claimed_at = now(), updated_at = now()
            WHERE id = (
                SELECT id FROM grading_jobs
                WHERE queue = $1 AND status = $3
                ORDER BY created_at
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING {JOB_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&self.name)
            .bind(JobStatus::Processing.as_str())
            .bind(JobStatus::Queued.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.map(GradingJob::try_from).transpose()
    }

    #[instrument(skip(self, outcome), fields(job_id = %id))]
    async fn complete(&self, id: &GradingJobId, outcome: &JobOutcome) -> Result<(), QueueError> {
        let status = if outcome.is_report() {
            JobStatus::Completed
        } else {
            JobStatus::Failed
        };
        let result = serde_json::to_value(outcome)
            .map_err(|e| QueueError::QueryFailed(format!("serialize outcome: {}", e)))?;

        let updated = sqlx::query(
            r#"
            UPDATE grading_jobs
            SET status = $2, result = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(status.as_str())
        .bind(result)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        if updated.rows_affected() == 0 {
            return Err(QueueError::NotFound(id.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get(&self, id: &GradingJobId) -> Result<Option<GradingJob>, QueueError> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM grading_jobs WHERE id = $1");

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        row.map(GradingJob::try_from).transpose()
    }

    #[instrument(skip(self), fields(queue = %self.name))]
    async fn requeue_stale(&self, visibility_timeout: Duration) -> Result<u64, QueueError> {
        let requeued = sqlx::query(
            r#"
            UPDATE grading_jobs
            SET status = $2, claimed_at = NULL, updated_at = now()
            WHERE queue = $1
              AND status = $3
              AND claimed_at < now() - make_interval(secs => $4)
            "#,
        )
        .bind(&self.name)
        .bind(JobStatus::Queued.as_str())
        .bind(JobStatus::Processing.as_str())
        .bind(visibility_timeout.as_secs_f64())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(requeued.rows_affected())
    }
}
