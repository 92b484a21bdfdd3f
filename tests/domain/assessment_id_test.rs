use speakscore::domain::{AssessmentId, DomainError, MAX_ASSESSMENT_ID_LEN};

#[test]
fn given_padded_id_when_parsing_then_returns_trimmed_id() {
    let id = AssessmentId::parse("  user_123 ").unwrap();
    assert_eq!(id.as_str(), "user_123");
    assert_eq!(id.to_string(), "user_123");
}

#[test]
fn given_blank_id_when_parsing_then_returns_empty_error() {
    assert!(matches!(
        AssessmentId::parse("   "),
        Err(DomainError::EmptyAssessmentId)
    ));
}

#[test]
fn given_overlong_id_when_parsing_then_returns_too_long_error() {
    let raw = "a".repeat(MAX_ASSESSMENT_ID_LEN + 1);
    assert!(matches!(
        AssessmentId::parse(raw),
        Err(DomainError::AssessmentIdTooLong(_))
    ));
}

#[test]
fn given_id_at_max_length_when_parsing_then_accepts_it() {
    let raw = "a".repeat(MAX_ASSESSMENT_ID_LEN);
    assert!(AssessmentId::parse(raw).is_ok());
}

#[test]
fn given_url_reserved_characters_when_parsing_then_rejects_id() {
    for raw in ["team/alice", "alice?x=1", "alice#1", "al ice", "alicé"] {
        assert!(
            matches!(
                AssessmentId::parse(raw),
                Err(DomainError::InvalidAssessmentIdChar(_))
            ),
            "{raw}"
        );
    }
}

#[test]
fn given_path_safe_punctuation_when_parsing_then_accepts_id() {
    let id = AssessmentId::parse("team.alice-01_b").unwrap();
    assert_eq!(id.as_str(), "team.alice-01_b");
}
