use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoamActionError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("Roam API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("{0}")]
    PartialFailure(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl RoamActionError {
    /// True for errors raised before any request leaves the process.
    pub fn is_validation(&self) -> bool {
        matches!(self, RoamActionError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, RoamActionError>;
