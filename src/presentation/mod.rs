pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Environment, Settings};
pub use router::{create_grading_router, create_intake_router};
pub use state::{GradingState, IntakeState, JobLookup};
