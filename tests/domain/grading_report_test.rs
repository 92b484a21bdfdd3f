use speakscore::domain::{GradingReport, JobOutcome};
use validator::Validate;

fn report_value(overall_band: f64, pronunciation: f64) -> serde_json::Value {
    serde_json::json!({
        "assessment_id": "user_1",
        "overall_band": overall_band,
        "detailed_scores": {
            "fluency_and_coherence": 6.5,
            "lexical_resource": 6.0,
            "grammatical_range_and_accuracy": 6.0,
            "pronunciation": pronunciation
        },
        "ai_feedback": {
            "strengths": ["Good fluency"],
            "weaknesses": ["Basic vocabulary"],
            "improved_transcript": "I am fond of travelling."
        }
    })
}

#[test]
fn given_report_json_when_deserializing_then_exposes_every_score() {
    let report: GradingReport = serde_json::from_value(report_value(6.5, 7.0)).unwrap();

    assert_eq!(report.overall_band, 6.5);
    assert_eq!(report.detailed_scores.as_array(), [6.5, 6.0, 6.0, 7.0]);
    assert_eq!(report.ai_feedback.strengths, vec!["Good fluency"]);
    assert!(report.validate().is_ok());
}

#[test]
fn given_report_when_serializing_then_keeps_wire_field_names() {
    let report: GradingReport = serde_json::from_value(report_value(6.5, 7.0)).unwrap();

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value, report_value(6.5, 7.0));
}

#[test]
fn given_band_above_nine_when_validating_then_fails() {
    let report: GradingReport = serde_json::from_value(report_value(9.5, 7.0)).unwrap();
    assert!(report.validate().is_err());
}

#[test]
fn given_negative_criterion_score_when_validating_then_fails() {
    let report: GradingReport = serde_json::from_value(report_value(6.0, -1.0)).unwrap();
    assert!(report.validate().is_err());
}

#[test]
fn given_error_outcome_when_serializing_then_is_bare_error_object() {
    let outcome = JobOutcome::error("Model returned malformed JSON");

    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(
        value,
        serde_json::json!({ "error": "Model returned malformed JSON" })
    );
    assert!(!outcome.is_report());
}

#[test]
fn given_stored_outcomes_when_deserializing_then_distinguishes_report_from_error() {
    let report: JobOutcome = serde_json::from_value(report_value(6.5, 7.0)).unwrap();
    let error: JobOutcome = serde_json::from_value(serde_json::json!({ "error": "boom" })).unwrap();

    assert!(report.is_report());
    assert_eq!(error, JobOutcome::error("boom"));
}
