mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    GradingSettings, IntakeSettings, LoggingSettings, QueueBackend, QueueSettings, ServerSettings,
    Settings, SubmissionMode, TranscriptionSettings,
};
