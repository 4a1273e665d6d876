mod audio_artifact;
mod challenge_phase;
mod transcript;

pub use audio_artifact::AudioArtifact;
pub use challenge_phase::ChallengePhase;
pub use transcript::Transcript;
