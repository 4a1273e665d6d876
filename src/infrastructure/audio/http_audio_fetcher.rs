use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{AudioFetchError, AudioFetcher};

/// Downloads challenge audio over HTTP into a local file.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
}

impl HttpAudioFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpAudioFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, AudioFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AudioFetchError::BadStatus(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(format!("body: {e}")))?;

        tokio::fs::write(dest, &bytes).await?;
        tracing::debug!(url, bytes = bytes.len(), dest = %dest.display(), "Audio fetched");

        Ok(bytes.len() as u64)
    }
}
