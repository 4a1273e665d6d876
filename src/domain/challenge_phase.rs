use std::fmt;

/// Protocol state of one challenge attempt.
///
/// `Solved` and `VerifiedSolved` are terminal success states; `Detected`
/// and `Failed` are terminal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengePhase {
    Init,
    CheckboxClicked,
    Solved,
    AudioActive,
    Detected,
    Transcribing,
    AnswerSubmitted,
    VerifiedSolved,
    Failed,
}

impl ChallengePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengePhase::Init => "INIT",
            ChallengePhase::CheckboxClicked => "CHECKBOX_CLICKED",
            ChallengePhase::Solved => "SOLVED",
            ChallengePhase::AudioActive => "AUDIO_ACTIVE",
            ChallengePhase::Detected => "DETECTED",
            ChallengePhase::Transcribing => "TRANSCRIBING",
            ChallengePhase::AnswerSubmitted => "ANSWER_SUBMITTED",
            ChallengePhase::VerifiedSolved => "VERIFIED_SOLVED",
            ChallengePhase::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChallengePhase::Solved
                | ChallengePhase::VerifiedSolved
                | ChallengePhase::Detected
                | ChallengePhase::Failed
        )
    }
}

impl fmt::Display for ChallengePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
