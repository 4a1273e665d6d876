mod helpers;

use anchorage::application::ports::{AudioTranscoder, TranscodeError};
use anchorage::infrastructure::audio::WavTranscoder;

use helpers::wav_fixture;

#[tokio::test]
async fn given_8khz_wav_when_transcoded_then_output_is_16khz_mono_pcm() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.wav");
    let dest = dir.path().join("dest.wav");
    std::fs::write(&source, wav_fixture(8_000, 0.25)).unwrap();

    WavTranscoder.transcode(&source, &dest).await.unwrap();

    let reader = hound::WavReader::open(&dest).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    // Resampling doubles the sample count, give or take edge trimming.
    let expected = (8_000.0 * 0.25 * 2.0) as u32;
    assert!(reader.len().abs_diff(expected) < 256);
}

#[tokio::test]
async fn given_16khz_wav_when_transcoded_then_samples_pass_through_without_resampling() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.wav");
    let dest = dir.path().join("dest.wav");
    std::fs::write(&source, wav_fixture(16_000, 0.25)).unwrap();

    WavTranscoder.transcode(&source, &dest).await.unwrap();

    let reader = hound::WavReader::open(&dest).unwrap();
    assert_eq!(reader.spec().sample_rate, 16_000);
    assert_eq!(reader.len(), (16_000.0 * 0.25) as u32);
}

#[tokio::test]
async fn given_garbage_input_when_transcoded_then_decoding_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.mp3");
    let dest = dir.path().join("dest.wav");
    std::fs::write(&source, b"this is not audio at all").unwrap();

    let result = WavTranscoder.transcode(&source, &dest).await;

    assert!(matches!(result, Err(TranscodeError::DecodingFailed(_))));
    assert!(!dest.exists());
}

#[tokio::test]
async fn given_missing_source_when_transcoded_then_io_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("absent.mp3");
    let dest = dir.path().join("dest.wav");

    let result = WavTranscoder.transcode(&source, &dest).await;

    assert!(matches!(result, Err(TranscodeError::Io(_))));
}
