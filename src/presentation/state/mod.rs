mod app_state;

pub use app_state::{GradingState, IntakeState, JobLookup};
