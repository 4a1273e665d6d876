use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::Transcript;

/// Oracle stand-in returning a fixed transcript, for wiring without the
/// remote service.
pub struct MockTranscriber {
    text: String,
}

impl MockTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _waveform: &Path) -> Result<Transcript, TranscriberError> {
        Ok(Transcript::new(self.text.clone()))
    }
}
