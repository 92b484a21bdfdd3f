use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::AudioFormat;

pub const TRANSCRIBE_PROMPT: &str = "Please transcribe this audio accurately.";

/// Transcribes audio by sending it, base64-encoded, as an `input_audio`
/// content part to an OpenAI-compatible chat completions endpoint.
pub struct MultimodalTranscriptionEngine {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl MultimodalTranscriptionEngine {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    fn request_body(&self, audio_data: &[u8], format: AudioFormat) -> serde_json::Value {
        let encoded = general_purpose::STANDARD.encode(audio_data);

        serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": TRANSCRIBE_PROMPT },
                        {
                            "type": "input_audio",
                            "input_audio": { "data": encoded, "format": format.as_str() }
                        }
                    ]
                }
            ]
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> TranscriptionError {
        if e.is_timeout() {
            TranscriptionError::Timeout(self.timeout.as_secs())
        } else {
            TranscriptionError::ApiRequestFailed(format!("request: {}", e))
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl TranscriptionEngine for MultimodalTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        if audio_data.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(audio_data, format);

        tracing::debug!(
            model = %self.model,
            format = %format,
            bytes = audio_data.len(),
            "Sending audio to transcription model"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranscriptionError::Timeout(self.timeout.as_secs())
            } else {
                TranscriptionError::InvalidResponse(format!("parse response: {}", e))
            }
        })?;

        let transcript = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TranscriptionError::InvalidResponse("empty choices".to_string()))?
            .message
            .content
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        if transcript.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }

        tracing::info!(chars = transcript.len(), "Transcription completed");

        Ok(transcript)
    }
}
