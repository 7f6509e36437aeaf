use thiserror::Error;

/// Errors surfaced while building a session or loading its inputs.
///
/// Everything here is a configuration problem: it is reported to the caller
/// before the first event is processed and never recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no corpus words have a length between {min} and {max}")]
    EmptyCorpus { min: usize, max: usize },

    #[error("invalid word length bounds: min {min}, max {max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("{name} must be greater than zero")]
    InvalidDimension { name: &'static str },

    #[error("session duration must be at least one second")]
    InvalidDuration,

    #[error("word count must be greater than zero")]
    InvalidWordCount,

    #[error("embedded word list {0} is missing")]
    MissingWordList(&'static str),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
