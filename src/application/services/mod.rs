mod audio_pipeline;
mod challenge_solver;
mod status_probes;

pub use audio_pipeline::{AudioPipeline, PipelineError};
pub use challenge_solver::{AudioPhaseError, ChallengeSolver, SolveError, SolverTiming};
pub use status_probes::StatusProbes;
