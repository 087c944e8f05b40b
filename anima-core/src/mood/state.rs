//! Emotional state and discrete mood classification.
//!
//! The state is four scalars in [0, 100]. The mood label is a pure
//! function of those scalars, evaluated as a first-match decision table:
//!
//! ```text
//! stress > 70                         → energy > 60 ? anxious : frustrated
//! energy < 30                         → stress > 40 ? melancholic : contemplative
//! energy > 80 && stress < 30          → confidence > 70 ? joyful : excited
//! confidence > 70 && stress < 40      → energy > 60 ? content : calm
//! social > 70 && 50 < confidence < 80 → curious
//! otherwise                           → neutral
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimaError;
use crate::types::clamp_percent;

/// Baseline energy a neutral stimulus relaxes toward.
pub const BASELINE_ENERGY: f64 = 70.0;
/// Baseline stress a neutral stimulus relaxes toward.
pub const BASELINE_STRESS: f64 = 20.0;
/// Baseline confidence a neutral stimulus relaxes toward.
pub const BASELINE_CONFIDENCE: f64 = 60.0;

/// The fixed set of discrete moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// High energy, low stress, high confidence.
    Joyful,
    /// Confident and energetic without excitement.
    Content,
    /// No strong signal either way.
    Neutral,
    /// Drained and stressed.
    Melancholic,
    /// Stressed while still energetic.
    Anxious,
    /// High energy, low stress, moderate confidence.
    Excited,
    /// Confident with moderate energy.
    Calm,
    /// Stressed and running low on energy.
    Frustrated,
    /// Socially open with moderate confidence.
    Curious,
    /// Low energy without much stress.
    Contemplative,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Joyful,
        Self::Content,
        Self::Neutral,
        Self::Melancholic,
        Self::Anxious,
        Self::Excited,
        Self::Calm,
        Self::Frustrated,
        Self::Curious,
        Self::Contemplative,
    ];

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joyful => "joyful",
            Self::Content => "content",
            Self::Neutral => "neutral",
            Self::Melancholic => "melancholic",
            Self::Anxious => "anxious",
            Self::Excited => "excited",
            Self::Calm => "calm",
            Self::Frustrated => "frustrated",
            Self::Curious => "curious",
            Self::Contemplative => "contemplative",
        }
    }

    /// Whether this mood is generally pleasant.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Self::Joyful | Self::Content | Self::Excited | Self::Calm | Self::Curious
        )
    }

    /// Whether this mood is generally unpleasant.
    #[must_use]
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Melancholic | Self::Anxious | Self::Frustrated)
    }

    /// Moods this one naturally flows into.
    ///
    /// Only consulted when adjacency enforcement is switched on in
    /// [`MoodConfig`](crate::config::MoodConfig).
    #[must_use]
    pub fn natural_successors(self) -> &'static [Mood] {
        use Mood::*;
        match self {
            Joyful => &[Content, Excited, Calm, Neutral],
            Content => &[Joyful, Calm, Neutral, Curious],
            Neutral => &[
                Content,
                Calm,
                Curious,
                Contemplative,
                Melancholic,
                Anxious,
                Frustrated,
                Excited,
            ],
            Melancholic => &[Contemplative, Neutral, Frustrated],
            Anxious => &[Frustrated, Neutral, Calm],
            Excited => &[Joyful, Curious, Anxious, Neutral],
            Calm => &[Content, Contemplative, Neutral, Curious],
            Frustrated => &[Anxious, Melancholic, Neutral],
            Curious => &[Excited, Content, Contemplative, Neutral],
            Contemplative => &[Calm, Melancholic, Curious, Neutral],
        }
    }

    /// Whether `next` is a natural successor (staying put always is).
    #[must_use]
    pub fn can_transition_to(self, next: Mood) -> bool {
        self == next || self.natural_successors().contains(&next)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AnimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnimaError::UnknownMood(s.to_string()))
    }
}

/// The entity's continuous emotional state plus its current mood label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Current mood label.
    pub mood: Mood,
    /// Available energy (0–100).
    pub energy: f64,
    /// Accumulated stress (0–100).
    pub stress: f64,
    /// Self-confidence (0–100).
    pub confidence: f64,
    /// Appetite for social contact (0–100).
    pub social_capacity: f64,
}

impl EmotionalState {
    /// Create a state from raw scalars, clamping each and classifying the mood.
    #[must_use]
    pub fn new(energy: f64, stress: f64, confidence: f64, social_capacity: f64) -> Self {
        let mut state = Self {
            mood: Mood::Neutral,
            energy,
            stress,
            confidence,
            social_capacity,
        };
        state.clamp();
        state.mood = state.classify();
        state
    }

    /// Override the mood label without touching the scalars.
    #[must_use]
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    /// Clamp every scalar into [0, 100].
    pub fn clamp(&mut self) {
        self.energy = clamp_percent(self.energy);
        self.stress = clamp_percent(self.stress);
        self.confidence = clamp_percent(self.confidence);
        self.social_capacity = clamp_percent(self.social_capacity);
    }

    /// Mood implied by the current scalars.
    #[must_use]
    pub fn classify(&self) -> Mood {
        classify(self.energy, self.stress, self.confidence, self.social_capacity)
    }
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::new(BASELINE_ENERGY, BASELINE_STRESS, BASELINE_CONFIDENCE, 70.0)
    }
}

/// Classify a mood from the four emotional scalars.
#[must_use]
pub fn classify(energy: f64, stress: f64, confidence: f64, social_capacity: f64) -> Mood {
    if stress > 70.0 {
        if energy > 60.0 { Mood::Anxious } else { Mood::Frustrated }
    } else if energy < 30.0 {
        if stress > 40.0 { Mood::Melancholic } else { Mood::Contemplative }
    } else if energy > 80.0 && stress < 30.0 {
        if confidence > 70.0 { Mood::Joyful } else { Mood::Excited }
    } else if confidence > 70.0 && stress < 40.0 {
        if energy > 60.0 { Mood::Content } else { Mood::Calm }
    } else if social_capacity > 70.0 && confidence > 50.0 && confidence < 80.0 {
        Mood::Curious
    } else {
        Mood::Neutral
    }
}
