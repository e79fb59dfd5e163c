use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {field} filter: '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("Invalid client {id}: {reason}")]
    InvalidClient { id: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
