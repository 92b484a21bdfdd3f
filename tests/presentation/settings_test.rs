use speakscore::domain::AudioFormat;
use speakscore::presentation::config::{Environment, QueueBackend, Settings};

#[test]
fn given_no_overrides_when_loading_settings_then_uses_built_in_defaults() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.queue.name, "grading_tasks");
    assert_eq!(settings.queue.backend, QueueBackend::Memory);
    assert_eq!(settings.transcription.default_format, AudioFormat::Mp3);
    assert_eq!(settings.intake.max_upload_bytes, 25 * 1024 * 1024);
    assert_eq!(settings.intake.grading_timeout().as_secs(), 60);
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(
        Environment::try_from("PROD".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_default_settings_when_validating_then_claims_outlive_grading_calls() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert!(settings.queue.visibility_timeout_secs > settings.grading.timeout_secs);
    assert!(settings.validate().is_ok());
    assert_eq!(settings.queue.result_ttl().as_secs(), 3600);
}

#[test]
fn given_visibility_timeout_not_above_grading_timeout_when_validating_then_rejects() {
    let mut settings = Settings::load(Environment::Test).unwrap();
    settings.grading.timeout_secs = 120;

    for visibility_timeout_secs in [60, 120] {
        settings.queue.visibility_timeout_secs = visibility_timeout_secs;

        let err = settings.validate().unwrap_err();

        assert!(err.to_string().contains("visibility_timeout_secs"));
    }
}
