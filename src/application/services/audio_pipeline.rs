use std::sync::Arc;

use crate::application::ports::{
    AudioFetchError, AudioFetcher, AudioTranscoder, TranscodeError, Transcriber, TranscriberError,
};
use crate::domain::{AudioArtifact, Transcript};

/// Fetch → transcode → transcribe, with unconditional cleanup of the
/// temporary artifact pair on every exit path.
pub struct AudioPipeline {
    fetcher: Arc<dyn AudioFetcher>,
    transcoder: Arc<dyn AudioTranscoder>,
    transcriber: Arc<dyn Transcriber>,
}

impl AudioPipeline {
    pub fn new(
        fetcher: Arc<dyn AudioFetcher>,
        transcoder: Arc<dyn AudioTranscoder>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            fetcher,
            transcoder,
            transcriber,
        }
    }

    /// Resolves a remote audio resource into its raw transcription. Case
    /// normalization is left to the caller.
    pub async fn resolve(&self, url: &str) -> Result<Transcript, PipelineError> {
        let artifact = AudioArtifact::allocate();
        let result = self.run(url, &artifact).await;
        artifact.cleanup();
        result
    }

    async fn run(
        &self,
        url: &str,
        artifact: &AudioArtifact,
    ) -> Result<Transcript, PipelineError> {
        let bytes = self
            .fetcher
            .fetch(url, artifact.compressed_path())
            .await?;
        tracing::debug!(bytes, "Challenge audio downloaded");

        self.transcoder
            .transcode(artifact.compressed_path(), artifact.waveform_path())
            .await?;

        let transcript = self
            .transcriber
            .transcribe(artifact.waveform_path())
            .await?;
        tracing::info!(chars = transcript.as_str().len(), "Challenge audio transcribed");

        Ok(transcript)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch: {0}")]
    Fetch(#[from] AudioFetchError),
    #[error("transcode: {0}")]
    Transcode(#[from] TranscodeError),
    #[error("recognition: {0}")]
    Recognition(#[from] TranscriberError),
}
