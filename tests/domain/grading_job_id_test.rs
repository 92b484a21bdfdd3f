use std::collections::HashSet;

use speakscore::domain::{AssessmentId, GradingJobId};

#[test]
fn given_assessment_id_when_generating_job_id_then_follows_handle_format() {
    let assessment_id = AssessmentId::parse("user_42").unwrap();

    let job_id = GradingJobId::generate(&assessment_id);

    let suffix = job_id
        .as_str()
        .strip_prefix("grading_user_42_")
        .expect("job id should embed the assessment id");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn given_same_assessment_id_when_generating_many_ids_then_all_are_unique() {
    let assessment_id = AssessmentId::parse("test_user").unwrap();

    let ids: HashSet<GradingJobId> = (0..10_000)
        .map(|_| GradingJobId::generate(&assessment_id))
        .collect();

    assert_eq!(ids.len(), 10_000);
}

#[test]
fn given_raw_handle_when_wrapping_then_round_trips_as_string() {
    let job_id = GradingJobId::from_raw("grading_x_deadbeef");
    assert_eq!(job_id.to_string(), "grading_x_deadbeef");
}
