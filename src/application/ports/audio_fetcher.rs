use std::path::Path;

use async_trait::async_trait;

/// Retrieves a remote audio resource into a local file.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, AudioFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {0}")]
    BadStatus(u16),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
