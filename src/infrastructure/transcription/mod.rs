mod mock_transcriber;
mod whisper_api_transcriber;

pub use mock_transcriber::MockTranscriber;
pub use whisper_api_transcriber::WhisperApiTranscriber;
