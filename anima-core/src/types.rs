//! Core type definitions shared by every ANIMA subsystem.
//!
//! Identifiers, the stimulus that drives the mood engine, and the
//! clamping helpers that keep every scalar inside its documented range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AnimaError;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a memory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemoryId(pub Uuid);

impl MemoryId {
    /// Create a new random memory ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a thought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThoughtId(pub Uuid);

impl ThoughtId {
    /// Create a new random thought ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ThoughtId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Stimulus
// ---------------------------------------------------------------------------

/// Emotional direction of a stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Pleasant input: raises energy and confidence, lowers stress.
    Positive,
    /// Unpleasant input: drains energy and confidence, raises stress.
    Negative,
    /// No clear direction: the state relaxes toward its baseline.
    Neutral,
}

impl Polarity {
    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = AnimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(AnimaError::UnknownPolarity(s.to_string())),
        }
    }
}

/// An emotional stimulus fed into the mood engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    /// Direction of the stimulus.
    pub polarity: Polarity,
    /// Strength of the stimulus (0–100).
    pub intensity: f64,
    /// Optional free-form description of what caused it.
    pub context: Option<String>,
}

impl Stimulus {
    /// Create a stimulus, clamping intensity to [0, 100].
    #[must_use]
    pub fn new(polarity: Polarity, intensity: f64) -> Self {
        Self {
            polarity,
            intensity: clamp_percent(intensity),
            context: None,
        }
    }

    /// Attach a context description.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Clamping & time helpers
// ---------------------------------------------------------------------------

/// Clamp a value into [0, 100]. NaN collapses to 0.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Clamp a value into [-100, 100]. NaN collapses to 0.
#[must_use]
pub fn clamp_weight(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-100.0, 100.0)
    }
}

/// Fractional days elapsed from `earlier` to `later` (never negative).
#[must_use]
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    const MILLIS_PER_DAY: f64 = 86_400_000.0;
    let millis = (later - earlier).num_milliseconds().max(0);
    millis as f64 / MILLIS_PER_DAY
}
