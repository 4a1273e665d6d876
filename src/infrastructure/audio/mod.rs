mod http_audio_fetcher;
mod wav_transcoder;

pub use http_audio_fetcher::HttpAudioFetcher;
pub use wav_transcoder::WavTranscoder;
