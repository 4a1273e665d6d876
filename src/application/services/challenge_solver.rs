use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{BrowserError, BrowserPage};
use crate::application::services::{AudioPipeline, PipelineError, StatusProbes};
use crate::domain::ChallengePhase;

const ANCHOR_FRAME_TITLE: &str = "reCAPTCHA";
const CHECKBOX_SELECTOR: &str = ".rc-anchor-content";
const CHALLENGE_FRAME_TITLE: &str = "recaptcha";
const AUDIO_BUTTON_SELECTOR: &str = "#recaptcha-audio-button";
const AUDIO_SOURCE_SELECTOR: &str = "#audio-source";
const ANSWER_FIELD_SELECTOR: &str = "#audio-response";
const VERIFY_BUTTON_SELECTOR: &str = "#recaptcha-verify-button";

/// Bounded-wait and settle-delay knobs for one solve attempt. The
/// detection timeout is tuned against one provider's UI, hence
/// configuration rather than a constant.
#[derive(Debug, Clone, Copy)]
pub struct SolverTiming {
    pub standard_timeout: Duration,
    pub short_timeout: Duration,
    pub detection_timeout: Duration,
    pub audio_settle: Duration,
    pub verify_settle: Duration,
}

impl Default for SolverTiming {
    fn default() -> Self {
        Self {
            standard_timeout: Duration::from_secs(7),
            short_timeout: Duration::from_secs(1),
            detection_timeout: Duration::from_millis(50),
            audio_settle: Duration::from_millis(300),
            verify_settle: Duration::from_millis(400),
        }
    }
}

/// Drives the end-to-end challenge protocol against one page: click the
/// checkbox, short-circuit if that alone solved it, switch to the audio
/// variant, bail out on detection, transcribe, submit, verify.
///
/// Single attempt only; retry policy belongs to the caller.
pub struct ChallengeSolver {
    page: Arc<dyn BrowserPage>,
    probes: StatusProbes,
    pipeline: AudioPipeline,
    timing: SolverTiming,
}

impl ChallengeSolver {
    pub fn new(page: Arc<dyn BrowserPage>, pipeline: AudioPipeline, timing: SolverTiming) -> Self {
        let probes = StatusProbes::new(
            Arc::clone(&page),
            timing.short_timeout,
            timing.detection_timeout,
        );
        Self {
            page,
            probes,
            pipeline,
            timing,
        }
    }

    /// Probes for this solver's page, usable for external diagnostics.
    pub fn probes(&self) -> &StatusProbes {
        &self.probes
    }

    pub async fn solve(&self) -> Result<(), SolveError> {
        let mut phase = ChallengePhase::Init;

        let anchor = self
            .page
            .frame_by_title(ANCHOR_FRAME_TITLE, self.timing.standard_timeout)
            .await?;
        let checkbox = anchor
            .select(CHECKBOX_SELECTOR, self.timing.standard_timeout)
            .await?;
        checkbox.click().await?;
        self.advance(&mut phase, ChallengePhase::CheckboxClicked);

        // Fast path: a trusted click can solve without any audio step.
        if self.probes.is_solved().await {
            self.advance(&mut phase, ChallengePhase::Solved);
            return Ok(());
        }

        // The anchor title is cased "reCAPTCHA"; only the challenge frame
        // title contains the lower-cased form.
        let challenge = self
            .page
            .frame_by_title(CHALLENGE_FRAME_TITLE, self.timing.standard_timeout)
            .await?;
        let audio_button = challenge
            .select(AUDIO_BUTTON_SELECTOR, self.timing.standard_timeout)
            .await?;
        audio_button.click().await?;
        // The frame re-renders asynchronously after the switch.
        tokio::time::sleep(self.timing.audio_settle).await;
        self.advance(&mut phase, ChallengePhase::AudioActive);

        if self.probes.is_detected().await {
            self.advance(&mut phase, ChallengePhase::Detected);
            return Err(SolveError::Detection);
        }

        match self.run_audio_phase(challenge.as_ref(), &mut phase).await {
            Ok(()) => {
                self.advance(&mut phase, ChallengePhase::VerifiedSolved);
                Ok(())
            }
            Err(e) => {
                self.advance(&mut phase, ChallengePhase::Failed);
                Err(SolveError::AudioChallenge(e))
            }
        }
    }

    async fn run_audio_phase(
        &self,
        challenge: &dyn BrowserPage,
        phase: &mut ChallengePhase,
    ) -> Result<(), AudioPhaseError> {
        let source = challenge
            .select(AUDIO_SOURCE_SELECTOR, self.timing.standard_timeout)
            .await?;
        let url = source
            .attribute("src")
            .await?
            .ok_or_else(|| BrowserError::NotFound("audio source src attribute".to_string()))?;
        self.advance(phase, ChallengePhase::Transcribing);

        let transcript = self.pipeline.resolve(&url).await?;

        let answer_field = challenge
            .select(ANSWER_FIELD_SELECTOR, self.timing.standard_timeout)
            .await?;
        answer_field.send_keys(&transcript.normalized()).await?;

        let verify_button = challenge
            .select(VERIFY_BUTTON_SELECTOR, self.timing.standard_timeout)
            .await?;
        verify_button.click().await?;
        tokio::time::sleep(self.timing.verify_settle).await;
        self.advance(phase, ChallengePhase::AnswerSubmitted);

        if self.probes.is_solved().await {
            Ok(())
        } else {
            Err(AudioPhaseError::Verification)
        }
    }

    fn advance(&self, phase: &mut ChallengePhase, next: ChallengePhase) {
        tracing::debug!(from = %phase, to = %next, "Challenge phase transition");
        *phase = next;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error("challenge flagged this session as automated")]
    Detection,
    #[error("audio challenge failed: {0}")]
    AudioChallenge(#[source] AudioPhaseError),
}

/// Failure inside the transcription/submission phase; wrapped by
/// [`SolveError::AudioChallenge`] so the origin is never lost.
#[derive(Debug, thiserror::Error)]
pub enum AudioPhaseError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error("transcription: {0}")]
    Transcription(#[from] PipelineError),
    #[error("answer submitted but the solved probe still reports false")]
    Verification,
}
