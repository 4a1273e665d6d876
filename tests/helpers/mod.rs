//! Shared fakes for driving the solver without a browser or network.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use anchorage::application::ports::{
    AudioFetchError, AudioFetcher, AudioTranscoder, BrowserError, BrowserPage, ElementHandle,
    TranscodeError, Transcriber, TranscriberError,
};
use anchorage::application::services::SolverTiming;
use anchorage::domain::Transcript;

pub const AUDIO_URL: &str = "https://challenge.example/payload.mp3";
pub const ORACLE_TEXT: &str = "Fireworks Dragon Violet";

/// Millisecond-scale timing so settle delays don't slow the suite down.
pub fn fast_timing() -> SolverTiming {
    SolverTiming {
        standard_timeout: Duration::from_millis(50),
        short_timeout: Duration::from_millis(10),
        detection_timeout: Duration::from_millis(5),
        audio_settle: Duration::from_millis(1),
        verify_settle: Duration::from_millis(1),
    }
}

/// Behavior switches and observable state for one scripted challenge page.
pub struct PageState {
    /// Checkbox click alone flips the solved style (fast path).
    pub checkbox_solves: bool,
    /// Switching to audio raises the anti-bot banner.
    pub detect_on_audio: bool,
    /// Clicking verify after an answer flips the solved style.
    pub verify_solves: bool,
    /// Audio button missing entirely (element-not-found path).
    pub audio_button_present: bool,
    pub token: Option<String>,

    solved: AtomicBool,
    banner_visible: AtomicBool,
    pub checkbox_clicks: AtomicUsize,
    pub verify_clicks: AtomicUsize,
    pub submitted_answer: Mutex<Option<String>>,
}

impl PageState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            checkbox_solves: false,
            detect_on_audio: false,
            verify_solves: false,
            audio_button_present: true,
            token: None,
            solved: AtomicBool::new(false),
            banner_visible: AtomicBool::new(false),
            checkbox_clicks: AtomicUsize::new(0),
            verify_clicks: AtomicUsize::new(0),
            submitted_answer: Mutex::new(None),
        })
    }

    pub fn is_solved(&self) -> bool {
        self.solved.load(Ordering::SeqCst)
    }
}

/// Scripted stand-in for the challenge demo page. Selectors are unique
/// across frames, so frame scoping collapses to the same handle.
#[derive(Clone)]
pub struct FakeChallengePage {
    state: Arc<PageState>,
}

impl FakeChallengePage {
    pub fn new(state: Arc<PageState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BrowserPage for FakeChallengePage {
    async fn select(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Box<dyn ElementHandle>, BrowserError> {
        let kind = match selector {
            ".rc-anchor-content" => ElementKind::Checkbox,
            "#recaptcha-audio-button" if self.state.audio_button_present => {
                ElementKind::AudioButton
            }
            "#audio-source" => ElementKind::AudioSource,
            "#audio-response" => ElementKind::AnswerField,
            "#recaptcha-verify-button" => ElementKind::VerifyButton,
            other => return Err(BrowserError::NotFound(other.to_string())),
        };
        Ok(Box::new(FakeElement {
            state: Arc::clone(&self.state),
            kind,
        }))
    }

    async fn select_all(
        &self,
        selector: &str,
        _timeout: Duration,
        _include_frames: bool,
    ) -> Result<Vec<Box<dyn ElementHandle>>, BrowserError> {
        let kind = match selector {
            ".recaptcha-checkbox-checkmark" => ElementKind::Checkmark,
            "#recaptcha-token" if self.state.token.is_some() => ElementKind::Token,
            other => return Err(BrowserError::NotFound(other.to_string())),
        };
        Ok(vec![Box::new(FakeElement {
            state: Arc::clone(&self.state),
            kind,
        })])
    }

    async fn find_text(
        &self,
        text: &str,
        _timeout: Duration,
    ) -> Result<Option<Box<dyn ElementHandle>>, BrowserError> {
        if text == "Try again later" && self.state.banner_visible.load(Ordering::SeqCst) {
            Ok(Some(Box::new(FakeElement {
                state: Arc::clone(&self.state),
                kind: ElementKind::Banner,
            })))
        } else {
            Ok(None)
        }
    }

    async fn frame_by_title(
        &self,
        _title_contains: &str,
        _timeout: Duration,
    ) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Ok(Box::new(self.clone()))
    }
}

#[derive(Clone, Copy)]
enum ElementKind {
    Checkbox,
    Checkmark,
    AudioButton,
    AudioSource,
    AnswerField,
    VerifyButton,
    Token,
    Banner,
}

struct FakeElement {
    state: Arc<PageState>,
    kind: ElementKind,
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn click(&self) -> Result<(), BrowserError> {
        match self.kind {
            ElementKind::Checkbox => {
                self.state.checkbox_clicks.fetch_add(1, Ordering::SeqCst);
                if self.state.checkbox_solves {
                    self.state.solved.store(true, Ordering::SeqCst);
                }
            }
            ElementKind::AudioButton => {
                if self.state.detect_on_audio {
                    self.state.banner_visible.store(true, Ordering::SeqCst);
                }
            }
            ElementKind::VerifyButton => {
                self.state.verify_clicks.fetch_add(1, Ordering::SeqCst);
                let answered = self.state.submitted_answer.lock().unwrap().is_some();
                if self.state.verify_solves && answered {
                    self.state.solved.store(true, Ordering::SeqCst);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), BrowserError> {
        if matches!(self.kind, ElementKind::AnswerField) {
            *self.state.submitted_answer.lock().unwrap() = Some(text.to_string());
        }
        Ok(())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        let value = match (self.kind, name) {
            (ElementKind::Checkmark, "style") => {
                if self.state.is_solved() {
                    Some("opacity: 1;".to_string())
                } else {
                    None
                }
            }
            (ElementKind::AudioSource, "src") => Some(AUDIO_URL.to_string()),
            (ElementKind::Token, "value") => self.state.token.clone(),
            _ => None,
        };
        Ok(value)
    }
}

/// Page whose every lookup fails, for the probe sentinel contract.
pub struct BrokenPage;

#[async_trait]
impl BrowserPage for BrokenPage {
    async fn select(
        &self,
        _selector: &str,
        _timeout: Duration,
    ) -> Result<Box<dyn ElementHandle>, BrowserError> {
        Err(BrowserError::Protocol("connection lost".to_string()))
    }

    async fn select_all(
        &self,
        _selector: &str,
        _timeout: Duration,
        _include_frames: bool,
    ) -> Result<Vec<Box<dyn ElementHandle>>, BrowserError> {
        Err(BrowserError::Protocol("connection lost".to_string()))
    }

    async fn find_text(
        &self,
        _text: &str,
        _timeout: Duration,
    ) -> Result<Option<Box<dyn ElementHandle>>, BrowserError> {
        Err(BrowserError::EvaluationFailed("script blocked".to_string()))
    }

    async fn frame_by_title(
        &self,
        _title_contains: &str,
        _timeout: Duration,
    ) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Err(BrowserError::NotFound("frame".to_string()))
    }
}

/// Fetcher that writes canned bytes and records every destination path.
pub struct RecordingFetcher {
    bytes: Vec<u8>,
    fail: bool,
    pub calls: AtomicUsize,
    pub destinations: Mutex<Vec<PathBuf>>,
}

impl RecordingFetcher {
    pub fn serving(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            fail: false,
            calls: AtomicUsize::new(0),
            destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            bytes: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioFetcher for RecordingFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> Result<u64, AudioFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.destinations.lock().unwrap().push(dest.to_path_buf());
        if self.fail {
            return Err(AudioFetchError::RequestFailed("dns failure".to_string()));
        }
        tokio::fs::write(dest, &self.bytes).await?;
        Ok(self.bytes.len() as u64)
    }
}

/// Transcoder that copies the source file and records both paths.
pub struct CopyTranscoder {
    pub destinations: Mutex<Vec<PathBuf>>,
}

impl CopyTranscoder {
    pub fn new() -> Self {
        Self {
            destinations: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AudioTranscoder for CopyTranscoder {
    async fn transcode(&self, source: &Path, dest: &Path) -> Result<(), TranscodeError> {
        self.destinations.lock().unwrap().push(dest.to_path_buf());
        tokio::fs::copy(source, dest).await?;
        Ok(())
    }
}

/// Oracle returning a fixed phrase, or a recognition failure.
pub struct FixedTranscriber {
    text: Option<String>,
}

impl FixedTranscriber {
    pub fn saying(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _waveform: &Path) -> Result<Transcript, TranscriberError> {
        match &self.text {
            Some(text) => Ok(Transcript::new(text.clone())),
            None => Err(TranscriberError::RecognitionFailed(
                "unintelligible audio".to_string(),
            )),
        }
    }
}

/// Small mono WAV fixture, built in memory with hound.
pub fn wav_fixture(sample_rate: u32, seconds: f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        let total = (sample_rate as f32 * seconds) as u32;
        for n in 0..total {
            let t = n as f32 / sample_rate as f32;
            let sample = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
            writer.write_sample((sample * 0.5 * f32::from(i16::MAX)) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}
