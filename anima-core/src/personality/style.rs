//! Personality-driven styles — traits shaping how the entity speaks and acts.
//!
//! Everything here is a pure function of the trait vector (plus mood and
//! relationship for the response style):
//!
//! - **Response style**: tone, verbosity, formality, empathy, assertiveness
//! - **Decision style**: analysis depth, risk tolerance, time horizon
//! - **Behavioral tendencies**: curiosity, sociability, cooperativeness
//!
//! Monotonicity guarantees: higher openness ⇒ deeper analysis and more
//! curiosity; higher neuroticism ⇒ lower risk tolerance; higher
//! conscientiousness ⇒ longer horizon and more planning; higher
//! agreeableness ⇒ more social consideration.

use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::mood::{EmotionalState, Mood};
use crate::personality::PersonalityVector;

/// Emotional coloring of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Bright and eager.
    Enthusiastic,
    /// Kind and open.
    Warm,
    /// Plain.
    Neutral,
    /// Quiet and low.
    Subdued,
    /// On edge.
    Tense,
    /// Lively.
    Energetic,
    /// At ease.
    Relaxed,
    /// Short and clipped.
    Curt,
    /// Asking, probing.
    Inquisitive,
    /// Careful and reflective.
    Thoughtful,
    /// Sociable and light.
    Friendly,
    /// Soft, careful with feelings.
    Gentle,
    /// Holding back.
    Guarded,
}

/// How much the entity says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Short answers.
    Concise,
    /// Normal length.
    Moderate,
    /// Elaborate answers.
    Verbose,
}

/// Register of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    /// Polite and proper.
    Formal,
    /// Neither.
    Neutral,
    /// Relaxed and familiar.
    Casual,
}

/// How the entity should phrase a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStyle {
    /// Emotional coloring.
    pub tone: Tone,
    /// Length.
    pub verbosity: Verbosity,
    /// Register.
    pub formality: Formality,
    /// Attention to the other's feelings (0–100).
    pub empathy: u8,
    /// Willingness to push a point (0–100).
    pub assertiveness: u8,
}

/// How far ahead the entity plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    /// Right now.
    Short,
    /// The next while.
    Medium,
    /// The long run.
    Long,
}

/// How the entity makes decisions. Scores are 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionStyle {
    /// How thoroughly options are examined.
    pub analysis_depth: f64,
    /// Appetite for uncertain outcomes.
    pub risk_tolerance: f64,
    /// How far ahead decisions look.
    pub time_horizon: TimeHorizon,
    /// Preference for plans over improvisation.
    pub planning_orientation: f64,
    /// Weight given to how decisions affect others.
    pub social_consideration: f64,
}

/// Broad behavioral leanings. Scores are 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehavioralTendencies {
    /// Drive to explore and ask.
    pub curiosity: f64,
    /// Drive to seek company.
    pub sociability: f64,
    /// Willingness to go along with others.
    pub cooperativeness: f64,
    /// Resistance to emotional swings.
    pub emotional_stability: f64,
    /// Tendency to see things through.
    pub persistence: f64,
    /// Attraction to new things.
    pub novelty_seeking: f64,
}

/// Derive a response style.
#[must_use]
pub fn response_style(
    traits: &PersonalityVector,
    state: &EmotionalState,
    context: Option<&ConversationContext>,
) -> ResponseStyle {
    let mut verbosity = if traits.extraversion > 70.0 && state.social_capacity > 60.0 {
        Verbosity::Verbose
    } else if traits.extraversion < 30.0 || state.social_capacity < 30.0 {
        Verbosity::Concise
    } else {
        Verbosity::Moderate
    };

    let mut formality = if traits.conscientiousness > 70.0 {
        Formality::Formal
    } else if traits.extraversion > 60.0 && traits.agreeableness > 60.0 {
        Formality::Casual
    } else {
        Formality::Neutral
    };

    if let Some(ctx) = context {
        match ctx.relationship_key().as_str() {
            "friend" | "family" => {
                formality = Formality::Casual;
                verbosity = verbosity.max(Verbosity::Moderate);
            }
            "professional" => formality = Formality::Formal,
            _ => {}
        }
    }

    let empathy = traits.agreeableness * (1.0 - 0.3 * traits.neuroticism / 100.0);
    let assertiveness = traits.extraversion * state.confidence / 100.0
        * (1.0 - 0.2 * traits.agreeableness / 100.0);

    ResponseStyle {
        tone: tone(traits, state.mood),
        verbosity,
        formality,
        empathy: to_score(empathy),
        assertiveness: to_score(assertiveness),
    }
}

/// Base tone for a mood, then adjusted by personality.
fn tone(traits: &PersonalityVector, mood: Mood) -> Tone {
    let base = match mood {
        Mood::Joyful => Tone::Enthusiastic,
        Mood::Content => Tone::Warm,
        Mood::Neutral => Tone::Neutral,
        Mood::Melancholic => Tone::Subdued,
        Mood::Anxious => Tone::Tense,
        Mood::Excited => Tone::Energetic,
        Mood::Calm => Tone::Relaxed,
        Mood::Frustrated => Tone::Curt,
        Mood::Curious => Tone::Inquisitive,
        Mood::Contemplative => Tone::Thoughtful,
    };

    if traits.neuroticism > 70.0 && mood.is_negative() {
        return Tone::Guarded;
    }
    match base {
        Tone::Curt if traits.agreeableness > 70.0 => Tone::Gentle,
        Tone::Neutral if traits.extraversion > 70.0 => Tone::Friendly,
        Tone::Neutral if traits.agreeableness > 70.0 => Tone::Warm,
        Tone::Enthusiastic if traits.extraversion < 30.0 => Tone::Warm,
        other => other,
    }
}

/// Derive a decision style.
#[must_use]
pub fn decision_style(traits: &PersonalityVector) -> DecisionStyle {
    let time_horizon = if traits.conscientiousness > 70.0 {
        TimeHorizon::Long
    } else if traits.conscientiousness < 30.0 {
        TimeHorizon::Short
    } else {
        TimeHorizon::Medium
    };

    DecisionStyle {
        analysis_depth: blend(&[(traits.openness, 0.6), (traits.conscientiousness, 0.4)]),
        risk_tolerance: blend(&[
            (traits.openness, 0.4),
            (traits.extraversion, 0.2),
            (100.0 - traits.neuroticism, 0.4),
        ]),
        time_horizon,
        planning_orientation: blend(&[
            (traits.conscientiousness, 0.7),
            (100.0 - traits.neuroticism, 0.3),
        ]),
        social_consideration: blend(&[(traits.agreeableness, 0.7), (traits.extraversion, 0.3)]),
    }
}

/// Derive behavioral tendencies.
#[must_use]
pub fn behavioral_tendencies(traits: &PersonalityVector) -> BehavioralTendencies {
    BehavioralTendencies {
        curiosity: blend(&[(traits.openness, 0.8), (traits.extraversion, 0.2)]),
        sociability: blend(&[(traits.extraversion, 0.7), (traits.agreeableness, 0.3)]),
        cooperativeness: blend(&[
            (traits.agreeableness, 0.8),
            (traits.conscientiousness, 0.2),
        ]),
        emotional_stability: 100.0 - traits.neuroticism,
        persistence: blend(&[
            (traits.conscientiousness, 0.8),
            (100.0 - traits.neuroticism, 0.2),
        ]),
        novelty_seeking: blend(&[(traits.openness, 0.7), (traits.extraversion, 0.3)]),
    }
}

/// Weighted sum of (value, weight) pairs, clamped to [0, 100].
fn blend(parts: &[(f64, f64)]) -> f64 {
    crate::types::clamp_percent(parts.iter().map(|(v, w)| v * w).sum())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u8 {
    crate::types::clamp_percent(value.round()) as u8
}
