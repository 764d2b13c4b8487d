use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
    #[error("Saved game is inconsistent: {0}")]
    InvalidSnapshot(&'static str),
    #[error("Storage backend failed: {0}")]
    Storage(String),
    #[error("Malformed JSON document: {0}")]
    Json(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
