use std::time::Duration;

use speakscore::application::ports::{JobQueue, QueueError};
use speakscore::domain::{AssessmentId, GradingJob, JobOutcome, JobStatus, Transcript};
use speakscore::infrastructure::persistence::PgJobQueue;

use crate::helpers::mocks::report_json;
use crate::helpers::test_postgres::{TEST_QUEUE, TestPostgres};

fn job(user: &str) -> GradingJob {
    let transcript = Transcript::new(AssessmentId::parse(user).unwrap(), "I like to travel").unwrap();
    GradingJob::new(TEST_QUEUE, &transcript)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_enqueued_job_when_claiming_then_row_moves_to_processing() {
    let pg = TestPostgres::new().await;
    let job = job("user_1");
    pg.job_queue.enqueue(&job).await.unwrap();

    let claimed = pg.job_queue.claim_next().await.unwrap().unwrap();

    assert_eq!(claimed.id, job.id);
    assert_eq!(claimed.status, JobStatus::Processing);
    assert_eq!(claimed.attempts, 1);
    assert_eq!(claimed.assessment_id.as_str(), "user_1");
    assert!(pg.job_queue.claim_next().await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_duplicate_id_when_enqueuing_then_returns_duplicate_job() {
    let pg = TestPostgres::new().await;
    let job = job("user_1");
    pg.job_queue.enqueue(&job).await.unwrap();

    let result = pg.job_queue.enqueue(&job).await;

    assert!(matches!(result, Err(QueueError::DuplicateJob(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_report_outcome_when_completing_then_result_is_stored_as_json() {
    let pg = TestPostgres::new().await;
    let job = job("user_1");
    pg.job_queue.enqueue(&job).await.unwrap();
    pg.job_queue.claim_next().await.unwrap();
    let outcome: JobOutcome = serde_json::from_str(&report_json(6.5)).unwrap();

    pg.job_queue.complete(&job.id, &outcome).await.unwrap();

    let stored = pg.job_queue.get(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.outcome, Some(outcome));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_two_queues_when_claiming_then_each_only_sees_its_own_jobs() {
    let pg = TestPostgres::new().await;
    let other = PgJobQueue::new(pg.pool.clone(), "other_queue");
    pg.job_queue.enqueue(&job("user_1")).await.unwrap();

    assert!(other.claim_next().await.unwrap().is_none());
    assert!(pg.job_queue.claim_next().await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_expired_claim_when_requeueing_stale_then_job_is_claimable_again() {
    let pg = TestPostgres::new().await;
    let job = job("user_1");
    pg.job_queue.enqueue(&job).await.unwrap();
    pg.job_queue.claim_next().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let requeued = pg
        .job_queue
        .requeue_stale(Duration::from_millis(10))
        .await
        .unwrap();

    assert_eq!(requeued, 1);
    let redelivered = pg.job_queue.claim_next().await.unwrap().unwrap();
    assert_eq!(redelivered.attempts, 2);
}
