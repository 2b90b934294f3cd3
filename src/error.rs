use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelopError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timestamp {0}: must be a finite, non-negative, representable number of seconds")]
    InvalidTimestamp(f64),

    #[error("Invalid segment at index {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, TelopError>;
