use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DeckzError {
    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Generation output error: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, DeckzError>;
