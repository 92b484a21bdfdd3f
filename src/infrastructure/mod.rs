pub mod audio;
pub mod grading;
pub mod llm;
pub mod observability;
pub mod persistence;
