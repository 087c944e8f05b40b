//! Mood Engine — emotional-state dynamics and internal monologue.
//!
//! Stimuli move the continuous [`EmotionalState`] by fixed linear
//! amounts; the discrete [`Mood`] is reclassified after every change.
//! Mood changes are appended to a bounded history and voiced as an
//! emotion [`Thought`]. Time only passes when the caller says so via
//! [`MoodEngine::simulate_time_passage`].

pub mod state;
pub mod thought;

pub use state::{classify, EmotionalState, Mood};
pub use thought::{Thought, ThoughtCategory};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MoodConfig;
use crate::types::{Polarity, Stimulus};

/// One recorded mood change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodHistoryEntry {
    /// The mood entered.
    pub mood: Mood,
    /// When it was entered.
    pub timestamp: DateTime<Utc>,
    /// The state that produced it.
    pub state: EmotionalState,
    /// What caused the change, if known.
    pub trigger: Option<String>,
}

/// Owns the entity's emotional state, mood history and thought buffer.
#[derive(Debug, Clone)]
pub struct MoodEngine {
    state: EmotionalState,
    history: Vec<MoodHistoryEntry>,
    thoughts: Vec<Thought>,
    last_spontaneous: Option<DateTime<Utc>>,
    config: MoodConfig,
}

impl MoodEngine {
    /// Create an engine starting from `initial`.
    #[must_use]
    pub fn new(initial: EmotionalState, config: MoodConfig) -> Self {
        let mut state = initial;
        state.clamp();
        Self {
            state,
            history: Vec::new(),
            thoughts: Vec::new(),
            last_spontaneous: None,
            config,
        }
    }

    /// Current emotional state.
    #[must_use]
    pub fn state(&self) -> &EmotionalState {
        &self.state
    }

    /// Current mood.
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.state.mood
    }

    /// Apply a stimulus and reclassify. Returns the resulting mood.
    pub fn update_mood(&mut self, stimulus: &Stimulus, now: DateTime<Utc>) -> Mood {
        let intensity = crate::types::clamp_percent(stimulus.intensity);
        let s = &mut self.state;
        match stimulus.polarity {
            Polarity::Positive => {
                s.energy += 0.3 * intensity;
                s.stress -= 0.2 * intensity;
                s.confidence += 0.25 * intensity;
            }
            Polarity::Negative => {
                s.energy -= 0.2 * intensity;
                s.stress += 0.4 * intensity;
                s.confidence -= 0.15 * intensity;
            }
            Polarity::Neutral => {
                let step = self.config.neutral_step;
                s.energy = step_toward(s.energy, state::BASELINE_ENERGY, step);
                s.stress = step_toward(s.stress, state::BASELINE_STRESS, step);
                s.confidence = step_toward(s.confidence, state::BASELINE_CONFIDENCE, step);
            }
        }
        s.clamp();

        let trigger = stimulus
            .context
            .clone()
            .unwrap_or_else(|| format!("{} stimulus", stimulus.polarity));
        self.reclassify(now, Some(trigger));
        self.state.mood
    }

    /// Let `minutes` of simulated time pass: energy and stress decay,
    /// social capacity recovers.
    pub fn simulate_time_passage(&mut self, minutes: f64, now: DateTime<Utc>) -> Mood {
        let minutes = minutes.max(0.0);
        self.state.energy -= 0.1 * minutes;
        self.state.stress -= 0.05 * minutes;
        self.state.social_capacity += 0.2 * minutes;
        self.state.clamp();
        self.reclassify(now, Some("time passage".to_string()));
        self.state.mood
    }

    /// Maybe produce a spontaneous thought.
    ///
    /// At most one thought per configured interval; returns `None` while
    /// rate-limited.
    pub fn generate_internal_monologue<R: Rng + ?Sized>(
        &mut self,
        context: Option<&str>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<Thought> {
        let interval = i64::try_from(self.config.thought_interval_secs).unwrap_or(i64::MAX);
        if let Some(last) = self.last_spontaneous {
            if (now - last).num_seconds() < interval {
                return None;
            }
        }

        let content = thought::templates(self.state.mood).choose(rng)?;
        let triggers = context.map(|c| vec![c.to_string()]).unwrap_or_default();
        let thought = Thought::new(*content, ThoughtCategory::infer(content), now, triggers);

        self.last_spontaneous = Some(now);
        self.push_thought(thought.clone());
        Some(thought)
    }

    /// Record an explicit thought.
    pub fn add_thought(
        &mut self,
        content: impl Into<String>,
        category: ThoughtCategory,
        triggers: Vec<String>,
        now: DateTime<Utc>,
    ) -> Thought {
        let thought = Thought::new(content, category, now, triggers);
        self.push_thought(thought.clone());
        thought
    }

    /// The `n` most recent thoughts, newest first.
    #[must_use]
    pub fn recent_thoughts(&self, n: usize) -> Vec<&Thought> {
        self.thoughts.iter().rev().take(n).collect()
    }

    /// All buffered thoughts of one category, oldest first.
    #[must_use]
    pub fn thoughts_by_category(&self, category: ThoughtCategory) -> Vec<&Thought> {
        self.thoughts.iter().filter(|t| t.category == category).collect()
    }

    /// Full mood history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoodHistoryEntry] {
        &self.history
    }

    /// History entries at or after `cutoff`, oldest first.
    #[must_use]
    pub fn history_since(&self, cutoff: DateTime<Utc>) -> Vec<&MoodHistoryEntry> {
        self.history.iter().filter(|e| e.timestamp >= cutoff).collect()
    }

    /// Replace the state wholesale (snapshot import). The mood label is
    /// taken as given; history and thoughts are untouched.
    pub fn restore(&mut self, state: EmotionalState) {
        self.state = state;
        self.state.clamp();
    }

    fn reclassify(&mut self, now: DateTime<Utc>, trigger: Option<String>) {
        let previous = self.state.mood;
        let mut next = self.state.classify();
        if self.config.enforce_adjacency && !previous.can_transition_to(next) {
            next = Mood::Neutral;
        }
        if next == previous {
            return;
        }

        self.state.mood = next;
        debug!(from = %previous, to = %next, "Mood changed");

        self.history.push(MoodHistoryEntry {
            mood: next,
            timestamp: now,
            state: self.state,
            trigger: trigger.clone(),
        });
        if self.history.len() > self.config.history_cap {
            let excess = self.history.len().saturating_sub(self.config.history_keep);
            self.history.drain(..excess);
        }

        let content = format!("I'm feeling {next} now, where a moment ago I was {previous}.");
        self.push_thought(Thought::new(
            content,
            ThoughtCategory::Emotion,
            now,
            trigger.into_iter().collect(),
        ));
    }

    fn push_thought(&mut self, thought: Thought) {
        self.thoughts.push(thought);
        if self.thoughts.len() > self.config.thought_cap {
            let excess = self.thoughts.len().saturating_sub(self.config.thought_keep);
            self.thoughts.drain(..excess);
        }
    }
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self::new(EmotionalState::default(), MoodConfig::default())
    }
}

/// Move `value` one `step` toward `target` without overshooting.
fn step_toward(value: f64, target: f64, step: f64) -> f64 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}
