//! Memory Record — a single stored experience.
//!
//! Every record carries an importance (0–100) and an emotional weight
//! (-100–100). Both are clamped on every write so no caller can push a
//! record out of range.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnimaError;
use crate::types::{clamp_percent, clamp_weight, MemoryId};

/// The kind of experience a record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCategory {
    /// "What happened" — conversation turns and events.
    Episodic,
    /// "What I know" — distilled knowledge and reflections.
    Semantic,
    /// "What I know how to do."
    Procedural,
    /// "How I felt" — affect-laden experiences.
    Emotional,
}

impl MemoryCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Episodic,
        Self::Semantic,
        Self::Procedural,
        Self::Emotional,
    ];

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Episodic => "episodic",
            Self::Semantic => "semantic",
            Self::Procedural => "procedural",
            Self::Emotional => "emotional",
        }
    }
}

impl fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryCategory {
    type Err = AnimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnimaError::UnknownCategory(s.to_string()))
    }
}

/// A single memory owned by a [`MemoryStore`](super::MemoryStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique identifier.
    pub id: MemoryId,
    /// Natural-language content.
    pub content: String,
    /// What kind of memory this is.
    pub category: MemoryCategory,
    /// How significant the memory is (0–100).
    pub importance: f64,
    /// Emotional charge (-100 negative to +100 positive).
    pub emotional_weight: f64,
    /// When the memory was formed.
    pub created_at: DateTime<Utc>,
    /// Free-form labels used by recall.
    pub tags: BTreeSet<String>,
    /// Symmetric links to related records.
    pub associations: BTreeSet<MemoryId>,
}

impl MemoryRecord {
    /// Create a new record, clamping importance and weight into range.
    #[must_use]
    pub fn new<I, S>(
        content: impl Into<String>,
        category: MemoryCategory,
        importance: f64,
        emotional_weight: f64,
        tags: I,
        created_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: MemoryId::new(),
            content: content.into(),
            category,
            importance: clamp_percent(importance),
            emotional_weight: clamp_weight(emotional_weight),
            created_at,
            tags: tags.into_iter().map(Into::into).collect(),
            associations: BTreeSet::new(),
        }
    }

    /// Raise importance by `delta`, saturating at 100.
    pub fn strengthen(&mut self, delta: f64) {
        self.importance = clamp_percent(self.importance + delta);
    }

    /// Re-apply the range invariants (used after deserializing foreign data).
    pub(crate) fn normalize(&mut self) {
        self.importance = clamp_percent(self.importance);
        self.emotional_weight = clamp_weight(self.emotional_weight);
    }

    /// Whether the record carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_importance_and_weight() {
        let r = MemoryRecord::new(
            "overflow",
            MemoryCategory::Emotional,
            250.0,
            -400.0,
            ["a"],
            Utc::now(),
        );
        assert!((r.importance - 100.0).abs() < f64::EPSILON);
        assert!((r.emotional_weight + 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strengthen_saturates() {
        let mut r = MemoryRecord::new(
            "x",
            MemoryCategory::Episodic,
            95.0,
            0.0,
            Vec::<String>::new(),
            Utc::now(),
        );
        r.strengthen(10.0);
        assert!((r.importance - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "Semantic".parse::<MemoryCategory>().ok(),
            Some(MemoryCategory::Semantic)
        );
        assert!(matches!(
            "dreamlike".parse::<MemoryCategory>(),
            Err(AnimaError::UnknownCategory(_))
        ));
    }
}
