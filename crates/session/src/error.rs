use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("preference storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("preference encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
