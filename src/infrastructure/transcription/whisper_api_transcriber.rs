use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::Transcript;

/// Transcription oracle backed by a Whisper-compatible HTTP API.
pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperApiTranscriber {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(&self, waveform: &Path) -> Result<Transcript, TranscriberError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio = tokio::fs::read(waveform).await?;

        let file_part = multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriberError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending challenge audio to transcription API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriberError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriberError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TranscriberError::ApiRequestFailed(format!("body: {}", e)))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(TranscriberError::RecognitionFailed(
                "empty transcription".to_string(),
            ));
        }

        tracing::info!(chars = text.len(), "Transcription completed");

        Ok(Transcript::new(text))
    }
}
