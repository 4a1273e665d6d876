mod audio_fetcher;
mod audio_transcoder;
mod browser_page;
mod transcriber;

pub use audio_fetcher::{AudioFetchError, AudioFetcher};
pub use audio_transcoder::{AudioTranscoder, TranscodeError};
pub use browser_page::{BrowserError, BrowserPage, ElementHandle};
pub use transcriber::{Transcriber, TranscriberError};
