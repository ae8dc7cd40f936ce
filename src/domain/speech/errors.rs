//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Speech text cannot be empty")]
    EmptyText,

    #[error("Invalid voice model: {0:?}")]
    InvalidVoiceModel(String),

    #[error("Invalid chunk size: {0} (must be greater than 0)")]
    InvalidChunkSize(usize),
}
