use speakscore::domain::{AssessmentId, DomainError, Transcript};

#[test]
fn given_text_when_creating_transcript_then_keeps_it_verbatim() {
    let id = AssessmentId::parse("user_1").unwrap();

    let transcript = Transcript::new(id, " I like to travel ").unwrap();

    assert_eq!(transcript.text, " I like to travel ");
    assert_eq!(transcript.assessment_id.as_str(), "user_1");
}

#[test]
fn given_whitespace_only_text_when_creating_transcript_then_rejects_it() {
    let id = AssessmentId::parse("user_1").unwrap();

    assert!(matches!(
        Transcript::new(id, " \n\t "),
        Err(DomainError::EmptyTranscript)
    ));
}
