//! Conversation context — one per participant an entity has talked to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship label given to participants the entity knows nothing about.
pub const DEFAULT_RELATIONSHIP: &str = "acquaintance";

/// History length that triggers trimming.
pub const HISTORY_LIMIT: usize = 20;

/// Entries kept after trimming.
pub const HISTORY_KEEP: usize = 10;

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The participant.
    Participant,
    /// The entity itself.
    Entity,
}

/// One line of conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who said it.
    pub speaker: Speaker,
    /// What was said.
    pub content: String,
    /// When it was said.
    pub timestamp: DateTime<Utc>,
}

/// Per-participant relationship and bounded turn history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Participant identifier.
    pub participant_id: String,
    /// Participant display name.
    pub participant_name: String,
    /// Free-form relationship label ("friend", "family", "professional", ...).
    pub relationship: String,
    /// Recent turns, oldest first.
    pub history: Vec<Turn>,
}

impl ConversationContext {
    /// Create an empty context with the default relationship.
    #[must_use]
    pub fn new(participant_id: impl Into<String>, participant_name: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            participant_name: participant_name.into(),
            relationship: DEFAULT_RELATIONSHIP.to_string(),
            history: Vec::new(),
        }
    }

    /// Append one turn, trimming the history once it grows past the limit.
    pub fn push_turn(
        &mut self,
        speaker: Speaker,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.history.push(Turn {
            speaker,
            content: content.into(),
            timestamp,
        });
        self.trim();
    }

    /// Append a participant turn and the entity's reply, then trim.
    ///
    /// Trimming only after both turns keeps exchanges whole.
    pub fn push_exchange(
        &mut self,
        input: impl Into<String>,
        reply: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.history.push(Turn {
            speaker: Speaker::Participant,
            content: input.into(),
            timestamp,
        });
        self.history.push(Turn {
            speaker: Speaker::Entity,
            content: reply.into(),
            timestamp,
        });
        self.trim();
    }

    fn trim(&mut self) {
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_KEEP;
            self.history.drain(..excess);
        }
    }

    /// Lowercased relationship label.
    #[must_use]
    pub fn relationship_key(&self) -> String {
        self.relationship.trim().to_lowercase()
    }
}
