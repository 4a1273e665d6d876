pub mod audio;
pub mod browser;
pub mod observability;
pub mod transcription;
