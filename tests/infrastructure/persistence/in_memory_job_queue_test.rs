use std::time::Duration;

use speakscore::application::ports::{JobQueue, QueueError};
use speakscore::domain::{AssessmentId, GradingJob, GradingJobId, JobOutcome, JobStatus, Transcript};
use speakscore::infrastructure::persistence::InMemoryJobQueue;

fn job(user: &str) -> GradingJob {
    let transcript = Transcript::new(AssessmentId::parse(user).unwrap(), "I like to travel").unwrap();
    GradingJob::new("grading_tasks", &transcript)
}

#[tokio::test]
async fn given_enqueued_jobs_when_claiming_then_returns_them_in_fifo_order() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let first = job("user_1");
    let second = job("user_2");
    queue.enqueue(&first).await.unwrap();
    queue.enqueue(&second).await.unwrap();

    let claimed_first = queue.claim_next().await.unwrap().unwrap();
    let claimed_second = queue.claim_next().await.unwrap().unwrap();

    assert_eq!(claimed_first.id, first.id);
    assert_eq!(claimed_second.id, second.id);
    assert_eq!(claimed_first.status, JobStatus::Processing);
    assert_eq!(claimed_first.attempts, 1);
    assert!(claimed_first.claimed_at.is_some());
    assert!(queue.claim_next().await.unwrap().is_none());
}

#[tokio::test]
async fn given_claimed_job_when_claiming_again_then_it_is_not_handed_out_twice() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    queue.enqueue(&job("user_1")).await.unwrap();

    assert!(queue.claim_next().await.unwrap().is_some());
    assert!(queue.claim_next().await.unwrap().is_none());
    assert_eq!(queue.pending().await, 0);
    assert_eq!(queue.len().await, 1);
}

#[tokio::test]
async fn given_same_job_twice_when_enqueuing_then_rejects_duplicate() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let job = job("user_1");
    queue.enqueue(&job).await.unwrap();

    let result = queue.enqueue(&job).await;

    assert!(matches!(result, Err(QueueError::DuplicateJob(_))));
}

#[tokio::test]
async fn given_error_outcome_when_completing_then_job_is_failed_with_error_recorded() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let job = job("user_1");
    queue.enqueue(&job).await.unwrap();
    queue.claim_next().await.unwrap();

    queue
        .complete(&job.id, &JobOutcome::error("bad json"))
        .await
        .unwrap();

    let stored = queue.get(&job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Failed);
    assert_eq!(stored.outcome, Some(JobOutcome::error("bad json")));
}

#[tokio::test]
async fn given_unknown_job_when_completing_then_returns_not_found() {
    let queue = InMemoryJobQueue::new("grading_tasks");

    let result = queue
        .complete(&GradingJobId::from_raw("grading_nobody_00000000"), &JobOutcome::error("x"))
        .await;

    assert!(matches!(result, Err(QueueError::NotFound(_))));
}

#[tokio::test]
async fn given_expired_claim_when_requeueing_stale_then_job_is_delivered_again() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let job = job("user_1");
    queue.enqueue(&job).await.unwrap();
    queue.claim_next().await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let requeued = queue.requeue_stale(Duration::from_millis(5)).await.unwrap();

    assert_eq!(requeued, 1);
    let redelivered = queue.claim_next().await.unwrap().unwrap();
    assert_eq!(redelivered.id, job.id);
    assert_eq!(redelivered.attempts, 2);
}

#[tokio::test]
async fn given_fresh_claim_when_requeueing_stale_then_leaves_it_alone() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    queue.enqueue(&job("user_1")).await.unwrap();
    queue.claim_next().await.unwrap();

    let requeued = queue.requeue_stale(Duration::from_secs(600)).await.unwrap();

    assert_eq!(requeued, 0);
    assert!(queue.claim_next().await.unwrap().is_none());
}

#[tokio::test]
async fn given_finished_job_when_requeueing_stale_then_it_stays_finished() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let job = job("user_1");
    queue.enqueue(&job).await.unwrap();
    queue.claim_next().await.unwrap();
    queue
        .complete(&job.id, &JobOutcome::error("boom"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let requeued = queue.requeue_stale(Duration::from_millis(5)).await.unwrap();

    assert_eq!(requeued, 0);
    assert_eq!(
        queue.get(&job.id).await.unwrap().unwrap().status,
        JobStatus::Failed
    );
}

#[tokio::test]
async fn given_finished_job_past_result_ttl_when_sweeping_then_it_is_evicted() {
    let queue =
        InMemoryJobQueue::new("grading_tasks").with_result_ttl(Duration::from_millis(5));
    let finished = job("user_1");
    let waiting = job("user_2");
    queue.enqueue(&finished).await.unwrap();
    queue.claim_next().await.unwrap();
    queue
        .complete(&finished.id, &JobOutcome::error("boom"))
        .await
        .unwrap();
    queue.enqueue(&waiting).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    queue.requeue_stale(Duration::from_secs(600)).await.unwrap();

    assert!(queue.get(&finished.id).await.unwrap().is_none());
    assert!(queue.get(&waiting.id).await.unwrap().is_some());
    assert_eq!(queue.len().await, 1);
}

#[tokio::test]
async fn given_many_finished_jobs_when_sweeping_after_each_then_memory_stays_bounded() {
    let queue =
        InMemoryJobQueue::new("grading_tasks").with_result_ttl(Duration::from_millis(1));

    for i in 0..200 {
        let job = job(&format!("user_{i}"));
        queue.enqueue(&job).await.unwrap();
        queue.claim_next().await.unwrap();
        queue
            .complete(&job.id, &JobOutcome::error("boom"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        queue.requeue_stale(Duration::from_secs(600)).await.unwrap();
    }

    assert_eq!(queue.len().await, 0);
}

#[tokio::test]
async fn given_finished_job_within_result_ttl_when_sweeping_then_result_stays_readable() {
    let queue = InMemoryJobQueue::new("grading_tasks");
    let job = job("user_1");
    queue.enqueue(&job).await.unwrap();
    queue.claim_next().await.unwrap();
    queue
        .complete(&job.id, &JobOutcome::error("boom"))
        .await
        .unwrap();

    queue.requeue_stale(Duration::from_secs(600)).await.unwrap();

    assert_eq!(
        queue.get(&job.id).await.unwrap().unwrap().status,
        JobStatus::Failed
    );
}
