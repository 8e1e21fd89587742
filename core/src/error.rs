use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unknown status '{0}'")]
    UnknownStatus(String),

    #[error("{0}")]
    Load(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
