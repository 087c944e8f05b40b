//! Serializable entity snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::entity::Identity;
use crate::memory::MemorySnapshot;
use crate::mood::EmotionalState;
use crate::personality::PersonalityVector;
use crate::types::EntityId;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to bring an entity back exactly as it was.
///
/// Mood history, buffered thoughts and the random source are not part of
/// the snapshot. Importing into a live entity keeps its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Entity identifier.
    pub id: EntityId,
    /// Who the entity is.
    pub identity: Identity,
    /// Trait vector.
    pub personality: PersonalityVector,
    /// Personality adaptation rate (0–100).
    pub learning_rate: f64,
    /// Emotional state at export time.
    pub emotional_state: EmotionalState,
    /// Every memory, by tier.
    pub memories: MemorySnapshot,
    /// Conversation contexts, ordered by participant id.
    pub contexts: Vec<ConversationContext>,
    /// Empathy level (0–100).
    pub empathy_level: f64,
    /// Simulated clock at export time.
    pub clock: DateTime<Utc>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}
