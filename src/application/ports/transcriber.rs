use std::path::Path;

use async_trait::async_trait;

use crate::domain::Transcript;

/// The transcription oracle: opaque, authoritative, remote.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, waveform: &Path) -> Result<Transcript, TranscriberError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriberError {
    #[error("audio not recognized: {0}")]
    RecognitionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
