use thiserror::Error;

/// Programmer-level runtime misuse. Ordinary gameplay misses (an unknown
/// action target, a verb with no block) come back as failure
/// [`Outcome`](crate::Outcome)s instead, never as errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no scene named '{0}'")]
    UnknownScene(String),
    #[error("no dialogue named '{0}'")]
    UnknownDialogue(String),
    #[error("no choices are pending")]
    NoPendingChoices,
    #[error("choice index {index} out of range (0..{len})")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("bad save snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
