use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Temporary file pair for one transcription attempt: the compressed
/// download and the decoded waveform. Names are UUID-based so concurrent
/// sessions cannot collide on the shared temp directory.
#[derive(Debug)]
pub struct AudioArtifact {
    compressed: PathBuf,
    waveform: PathBuf,
}

impl AudioArtifact {
    pub fn allocate() -> Self {
        let dir = std::env::temp_dir();
        Self {
            compressed: dir.join(format!("{}.mp3", Uuid::new_v4())),
            waveform: dir.join(format!("{}.wav", Uuid::new_v4())),
        }
    }

    pub fn compressed_path(&self) -> &Path {
        &self.compressed
    }

    pub fn waveform_path(&self) -> &Path {
        &self.waveform
    }

    /// Best-effort removal of both files. Missing files are fine; removal
    /// failures are logged and swallowed so they never mask the outcome of
    /// the attempt that owned this artifact.
    pub fn cleanup(&self) {
        for path in [&self.compressed, &self.waveform] {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::debug!(path = %path.display(), error = %e, "Artifact removal failed");
                }
            }
        }
    }
}
