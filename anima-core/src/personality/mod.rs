//! Personality Model — Big Five trait vector with slow adaptive drift.
//!
//! Traits live in [0, 100]. They never jump: the only way to move them
//! is [`PersonalityModel::update_traits`], which closes a fixed
//! percentage of the gap to a target value per call (an exponential
//! moving average).

pub mod style;

pub use style::{
    BehavioralTendencies, DecisionStyle, Formality, ResponseStyle, TimeHorizon, Tone, Verbosity,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::error::AnimaError;
use crate::mood::EmotionalState;
use crate::types::clamp_percent;

/// One of the Big Five traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    /// Curiosity, creativity, novelty-seeking.
    Openness,
    /// Orderliness, self-discipline, planning.
    Conscientiousness,
    /// Social energy and assertiveness.
    Extraversion,
    /// Empathy, cooperation, trust.
    Agreeableness,
    /// Emotional instability and anxiety.
    Neuroticism,
}

impl Trait {
    /// Every trait, in OCEAN order.
    pub const ALL: [Self; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trait {
    type Err = AnimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openness" | "o" => Ok(Self::Openness),
            "conscientiousness" | "c" => Ok(Self::Conscientiousness),
            "extraversion" | "e" => Ok(Self::Extraversion),
            "agreeableness" | "a" => Ok(Self::Agreeableness),
            "neuroticism" | "n" => Ok(Self::Neuroticism),
            _ => Err(AnimaError::UnknownTrait(s.to_string())),
        }
    }
}

/// Big Five trait vector plus optional descriptive labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityVector {
    /// Openness to experience (0–100).
    pub openness: f64,
    /// Conscientiousness (0–100).
    pub conscientiousness: f64,
    /// Extraversion (0–100).
    pub extraversion: f64,
    /// Agreeableness (0–100).
    pub agreeableness: f64,
    /// Neuroticism (0–100).
    pub neuroticism: f64,
    /// Categorical type tag (e.g. "INFP").
    #[serde(default)]
    pub type_tag: Option<String>,
    /// Temperament label (e.g. "sanguine").
    #[serde(default)]
    pub temperament: Option<String>,
    /// Archetype label (e.g. "Sage").
    #[serde(default)]
    pub archetype: Option<String>,
}

impl PersonalityVector {
    /// Create a vector from the five traits, clamping each.
    #[must_use]
    pub fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        neuroticism: f64,
    ) -> Self {
        let mut v = Self {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
            type_tag: None,
            temperament: None,
            archetype: None,
        };
        v.clamp();
        v
    }

    /// Every trait at the midpoint.
    #[must_use]
    pub fn balanced() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0, 50.0)
    }

    /// Warm and curious, emotionally stable.
    #[must_use]
    pub fn warm() -> Self {
        Self::new(85.0, 70.0, 75.0, 80.0, 25.0).with_archetype("Caregiver")
    }

    /// Low reactivity, high discipline.
    #[must_use]
    pub fn stoic() -> Self {
        Self::new(50.0, 90.0, 30.0, 60.0, 10.0).with_archetype("Sage")
    }

    /// High openness, moderate neuroticism.
    #[must_use]
    pub fn creative() -> Self {
        Self::new(95.0, 40.0, 65.0, 70.0, 45.0).with_archetype("Creator")
    }

    /// High neuroticism, low extraversion.
    #[must_use]
    pub fn anxious() -> Self {
        Self::new(50.0, 60.0, 25.0, 65.0, 85.0).with_archetype("Orphan")
    }

    /// Set the archetype label.
    #[must_use]
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    /// Set the categorical type tag.
    #[must_use]
    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    /// Set the temperament label.
    #[must_use]
    pub fn with_temperament(mut self, temperament: impl Into<String>) -> Self {
        self.temperament = Some(temperament.into());
        self
    }

    /// Read one trait.
    #[must_use]
    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    fn slot(&mut self, t: Trait) -> &mut f64 {
        match t {
            Trait::Openness => &mut self.openness,
            Trait::Conscientiousness => &mut self.conscientiousness,
            Trait::Extraversion => &mut self.extraversion,
            Trait::Agreeableness => &mut self.agreeableness,
            Trait::Neuroticism => &mut self.neuroticism,
        }
    }

    /// Clamp all traits to [0, 100].
    pub fn clamp(&mut self) {
        for t in Trait::ALL {
            let v = self.slot(t);
            *v = clamp_percent(*v);
        }
    }
}

impl Default for PersonalityVector {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Target values for [`PersonalityModel::update_traits`]. Unset traits are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitDelta {
    /// Target openness.
    pub openness: Option<f64>,
    /// Target conscientiousness.
    pub conscientiousness: Option<f64>,
    /// Target extraversion.
    pub extraversion: Option<f64>,
    /// Target agreeableness.
    pub agreeableness: Option<f64>,
    /// Target neuroticism.
    pub neuroticism: Option<f64>,
}

impl TraitDelta {
    /// Set the target for one trait.
    #[must_use]
    pub fn with(mut self, t: Trait, target: f64) -> Self {
        *self.slot(t) = Some(target);
        self
    }

    /// Target for one trait, if set.
    #[must_use]
    pub fn get(&self, t: Trait) -> Option<f64> {
        match t {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }

    fn slot(&mut self, t: Trait) -> &mut Option<f64> {
        match t {
            Trait::Openness => &mut self.openness,
            Trait::Conscientiousness => &mut self.conscientiousness,
            Trait::Extraversion => &mut self.extraversion,
            Trait::Agreeableness => &mut self.agreeableness,
            Trait::Neuroticism => &mut self.neuroticism,
        }
    }

    /// Whether no target is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Trait::ALL.iter().all(|t| self.get(*t).is_none())
    }
}

/// Owns the trait vector and its adaptation rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityModel {
    traits: PersonalityVector,
    adaptation_rate: f64,
}

impl PersonalityModel {
    /// Create a model. Traits and rate are clamped to [0, 100].
    #[must_use]
    pub fn new(traits: PersonalityVector, adaptation_rate: f64) -> Self {
        let mut traits = traits;
        traits.clamp();
        Self {
            traits,
            adaptation_rate: clamp_percent(adaptation_rate),
        }
    }

    /// Current trait vector.
    #[must_use]
    pub fn traits(&self) -> &PersonalityVector {
        &self.traits
    }

    /// Percentage of the gap closed per update.
    #[must_use]
    pub fn adaptation_rate(&self) -> f64 {
        self.adaptation_rate
    }

    /// Change the adaptation rate (clamped to [0, 100]).
    pub fn set_adaptation_rate(&mut self, rate: f64) {
        self.adaptation_rate = clamp_percent(rate);
    }

    /// Drift each targeted trait toward its target:
    /// `current += (target − current) × rate / 100`.
    pub fn update_traits(&mut self, delta: &TraitDelta) {
        let rate = self.adaptation_rate / 100.0;
        for t in Trait::ALL {
            if let Some(target) = delta.get(t) {
                let target = clamp_percent(target);
                let slot = self.traits.slot(t);
                *slot = clamp_percent(*slot + (target - *slot) * rate);
            }
        }
    }

    /// How the entity should speak, given its mood and who it is talking to.
    #[must_use]
    pub fn derive_response_style(
        &self,
        state: &EmotionalState,
        context: Option<&ConversationContext>,
    ) -> ResponseStyle {
        style::response_style(&self.traits, state, context)
    }

    /// How the entity makes decisions.
    #[must_use]
    pub fn derive_decision_style(&self) -> DecisionStyle {
        style::decision_style(&self.traits)
    }

    /// Broad behavioral leanings.
    #[must_use]
    pub fn derive_behavioral_tendencies(&self) -> BehavioralTendencies {
        style::behavioral_tendencies(&self.traits)
    }

    /// Human-readable summary, e.g. `"curious, outgoing and emotionally steady (Sage)"`.
    #[must_use]
    pub fn description(&self) -> String {
        let t = &self.traits;
        let mut words: Vec<&str> = Vec::new();
        push_pole(&mut words, t.openness, "curious", "conventional");
        push_pole(&mut words, t.conscientiousness, "organized", "spontaneous");
        push_pole(&mut words, t.extraversion, "outgoing", "reserved");
        push_pole(&mut words, t.agreeableness, "warm", "blunt");
        push_pole(&mut words, t.neuroticism, "sensitive", "emotionally steady");

        let mut description = match words.as_slice() {
            [] => "balanced".to_string(),
            [only] => (*only).to_string(),
            [init @ .., last] => format!("{} and {last}", init.join(", ")),
        };
        if let Some(archetype) = &t.archetype {
            description.push_str(&format!(" ({archetype})"));
        }
        description
    }
}

impl Default for PersonalityModel {
    fn default() -> Self {
        Self::new(PersonalityVector::default(), 10.0)
    }
}

fn push_pole<'a>(words: &mut Vec<&'a str>, value: f64, high: &'a str, low: &'a str) {
    if value > 70.0 {
        words.push(high);
    } else if value < 30.0 {
        words.push(low);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_moves_a_fraction_of_the_gap() {
        let mut model = PersonalityModel::new(PersonalityVector::balanced(), 10.0);
        model.update_traits(&TraitDelta::default().with(Trait::Extraversion, 100.0));
        assert!((model.traits().extraversion - 55.0).abs() < 1e-9);
        assert!((model.traits().openness - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_clamps_targets() {
        let mut model = PersonalityModel::new(PersonalityVector::balanced(), 100.0);
        model.update_traits(&TraitDelta::default().with(Trait::Neuroticism, 500.0));
        assert!((model.traits().neuroticism - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_rate_never_drifts() {
        let mut model = PersonalityModel::new(PersonalityVector::warm(), 0.0);
        let before = model.traits().clone();
        model.update_traits(&TraitDelta::default().with(Trait::Openness, 0.0));
        assert_eq!(model.traits(), &before);
    }

    #[test]
    fn construction_clamps() {
        let v = PersonalityVector::new(-5.0, 120.0, 50.0, 50.0, 50.0);
        assert!(v.openness.abs() < f64::EPSILON);
        assert!((v.conscientiousness - 100.0).abs() < f64::EPSILON);
        let model = PersonalityModel::new(v, 250.0);
        assert!((model.adaptation_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trait_names_parse() {
        assert_eq!("E".parse::<Trait>().ok(), Some(Trait::Extraversion));
        assert!(matches!("charisma".parse::<Trait>(), Err(AnimaError::UnknownTrait(_))));
    }

    #[test]
    fn description_mentions_poles_and_archetype() {
        let model = PersonalityModel::new(PersonalityVector::stoic(), 10.0);
        let d = model.description();
        assert!(d.contains("organized"));
        assert!(d.contains("emotionally steady"));
        assert!(d.ends_with("(Sage)"));
        assert_eq!(PersonalityModel::default().description(), "balanced");
    }
}
