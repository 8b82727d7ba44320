use thiserror::Error;

/// Errors raised at the boundary of the engine.
///
/// Empty solution sets and failed rollouts are reported as state, never as
/// errors.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid word '{0}': expected five letters a-z")]
    InvalidWord(String),

    #[error("Invalid pattern '{0}': expected five of g/y/b (or 2/1/0)")]
    InvalidPattern(String),

    #[error("Word '{0}' is not in the guess dictionary")]
    UnknownWord(String),

    #[error("No observation at index {0}")]
    NoSuchObservation(usize),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type SolverResult<T> = Result<T, SolverError>;
