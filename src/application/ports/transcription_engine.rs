use async_trait::async_trait;

use crate::domain::AudioFormat;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Returns the transcript text, never empty on success.
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio payload is empty")]
    EmptyAudio,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("transcription timed out after {0}s")]
    Timeout(u64),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned an empty transcript")]
    EmptyTranscript,
}
