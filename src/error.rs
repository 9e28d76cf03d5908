//! Error types for the cube guessing game

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("Cube \"{0}\" not found. Please check the ID and try again.")]
    CollectionNotFound(String),

    #[error("Cube source unavailable: {0}")]
    CollectionUnavailable(String),

    #[error("No cards found in cube \"{0}\". Please check the Cube ID.")]
    EmptyCollection(String),

    #[error("Malformed card record: {0}")]
    MalformedCard(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl From<serde_json::Error> for CubeError {
    fn from(e: serde_json::Error) -> Self {
        CubeError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CubeError>;
