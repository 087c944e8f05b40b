//! Thoughts — the entity's internal monologue.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnimaError;
use crate::mood::Mood;
use crate::types::ThoughtId;

/// What kind of thought this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtCategory {
    /// Looking back on experience.
    Reflection,
    /// A choice made.
    Decision,
    /// Something noticed.
    Observation,
    /// Something to do later.
    Planning,
    /// A feeling put into words.
    Emotion,
}

impl ThoughtCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Reflection,
        Self::Decision,
        Self::Observation,
        Self::Planning,
        Self::Emotion,
    ];

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reflection => "reflection",
            Self::Decision => "decision",
            Self::Observation => "observation",
            Self::Planning => "planning",
            Self::Emotion => "emotion",
        }
    }

    /// Keyword categorization of free text.
    ///
    /// First match wins: "wonder"/"interesting" → observation,
    /// "should"/"need to" → planning, "feeling"/"I'm" → emotion,
    /// anything else → reflection.
    #[must_use]
    pub fn infer(content: &str) -> Self {
        let lower = content.to_lowercase();
        if lower.contains("wonder") || lower.contains("interesting") {
            Self::Observation
        } else if lower.contains("should") || lower.contains("need to") {
            Self::Planning
        } else if lower.contains("feeling") || lower.contains("i'm") {
            Self::Emotion
        } else {
            Self::Reflection
        }
    }
}

impl fmt::Display for ThoughtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThoughtCategory {
    type Err = AnimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnimaError::UnknownCategory(s.to_string()))
    }
}

/// A single internal thought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    /// Unique identifier.
    pub id: ThoughtId,
    /// The thought itself.
    pub content: String,
    /// What kind of thought it is.
    pub category: ThoughtCategory,
    /// When it occurred.
    pub timestamp: DateTime<Utc>,
    /// What prompted it, if anything.
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl Thought {
    /// Create a thought with an explicit category.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        category: ThoughtCategory,
        timestamp: DateTime<Utc>,
        triggers: Vec<String>,
    ) -> Self {
        Self {
            id: ThoughtId::new(),
            content: content.into(),
            category,
            timestamp,
            triggers,
        }
    }
}

/// Spontaneous-thought templates for each mood.
#[must_use]
pub fn templates(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Joyful => &[
            "Everything feels bright right now.",
            "I'm feeling wonderful today.",
            "I should share this good energy with someone.",
        ],
        Mood::Content => &[
            "Things are going well.",
            "I'm feeling settled and at ease.",
            "It's interesting how small things add up to a good day.",
        ],
        Mood::Neutral => &[
            "Nothing much stands out at the moment.",
            "I wonder what will come up next.",
            "I should keep an eye on how things develop.",
        ],
        Mood::Melancholic => &[
            "Things feel heavier than usual.",
            "I'm feeling a bit low.",
            "I need to be patient with myself.",
        ],
        Mood::Anxious => &[
            "Something feels off and I can't place it.",
            "I'm feeling on edge.",
            "I need to slow down and breathe.",
        ],
        Mood::Excited => &[
            "So much is happening at once.",
            "I'm feeling full of energy.",
            "I wonder where all this momentum will lead.",
        ],
        Mood::Calm => &[
            "There's a quiet steadiness to this moment.",
            "I'm feeling grounded.",
            "I should take this time to think things through.",
        ],
        Mood::Frustrated => &[
            "This isn't going the way it should.",
            "I'm feeling stuck.",
            "Things keep getting in the way.",
        ],
        Mood::Curious => &[
            "I wonder how all of this fits together.",
            "That's an interesting thread to follow.",
            "There's more to learn here.",
        ],
        Mood::Contemplative => &[
            "Looking back, a pattern is starting to show.",
            "I wonder what all of this means.",
            "Some things only make sense in hindsight.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_categorization_priority() {
        assert_eq!(ThoughtCategory::infer("I wonder if I should"), ThoughtCategory::Observation);
        assert_eq!(ThoughtCategory::infer("I need to rest"), ThoughtCategory::Planning);
        assert_eq!(ThoughtCategory::infer("I'm tired"), ThoughtCategory::Emotion);
        assert_eq!(ThoughtCategory::infer("Rain again."), ThoughtCategory::Reflection);
    }

    #[test]
    fn every_mood_has_templates() {
        for mood in Mood::ALL {
            assert!(!templates(mood).is_empty(), "{mood} has no templates");
        }
    }

    #[test]
    fn category_rejects_unknown_labels() {
        assert!(matches!(
            "daydream".parse::<ThoughtCategory>(),
            Err(AnimaError::UnknownCategory(_))
        ));
    }
}
