mod multimodal_transcription_engine;

pub use multimodal_transcription_engine::{MultimodalTranscriptionEngine, TRANSCRIBE_PROMPT};
