use std::path::Path;

use async_trait::async_trait;

/// Decodes a compressed audio file and writes it as an uncompressed
/// waveform container the transcription oracle can consume.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn transcode(&self, source: &Path, dest: &Path) -> Result<(), TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("waveform encoding failed: {0}")]
    EncodingFailed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
