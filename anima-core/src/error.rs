//! Error types for the ANIMA core library.

use thiserror::Error;

/// Top-level error type for all ANIMA operations.
#[derive(Error, Debug)]
pub enum AnimaError {
    /// A memory with the given ID was not found.
    #[error("Memory not found: {0}")]
    MemoryNotFound(crate::MemoryId),

    /// Entity not found in the registry.
    #[error("Entity not found: {0}")]
    EntityNotFound(crate::EntityId),

    /// No conversation context exists for the participant.
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    /// A mood label outside the fixed enumeration.
    #[error("Unknown mood: {0:?}")]
    UnknownMood(String),

    /// A memory or thought category outside the fixed enumeration.
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),

    /// A personality trait name outside the Big Five.
    #[error("Unknown trait: {0:?}")]
    UnknownTrait(String),

    /// A stimulus polarity other than positive / negative / neutral.
    #[error("Unknown polarity: {0:?}")]
    UnknownPolarity(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AnimaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AnimaError>;
