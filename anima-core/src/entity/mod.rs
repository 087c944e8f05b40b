//! Entity — the orchestrator wiring memory, mood and personality together.
//!
//! An [`Entity`] owns one [`MemoryStore`], one [`MoodEngine`], one
//! [`PersonalityModel`] and a [`ConversationContext`] per participant.
//! Every call to [`Entity::respond`] runs the same pipeline:
//!
//! 1. fetch or create the participant's context
//! 2. classify the input's emotional impact
//! 3. feed the resulting stimulus to the mood engine
//! 4. store the input as an episodic memory
//! 5. recall related memories
//! 6. maybe think a spontaneous thought, and note questions
//! 7. derive a response style from personality and the new mood
//! 8. compose the reply
//! 9. store the reply as an episodic memory
//! 10. append both turns to the context
//! 11. return an [`InteractionResult`]
//!
//! The entity keeps its own simulated clock. Nothing in here reads the
//! wall clock after construction; time moves only through
//! [`Entity::simulate_time_passage`].

pub mod classifier;
pub mod composer;
pub mod snapshot;

pub use classifier::{EmotionalImpact, ImpactClassifier, LexiconClassifier};
pub use composer::{CompositionRequest, ResponseComposer, TemplateComposer};
pub use snapshot::{EntitySnapshot, SNAPSHOT_VERSION};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnimaConfig;
use crate::context::ConversationContext;
use crate::error::{AnimaError, Result};
use crate::memory::record::{MemoryCategory, MemoryRecord};
use crate::memory::{MemoryStats, MemoryStore};
use crate::mood::{EmotionalState, Mood, MoodEngine, MoodHistoryEntry, Thought, ThoughtCategory};
use crate::personality::{PersonalityModel, PersonalityVector, ResponseStyle, Trait, TraitDelta};
use crate::types::{clamp_percent, EntityId};

/// Importance of stored replies.
pub const RESPONSE_IMPORTANCE: f64 = 40.0;

/// Importance of stored reflections. Above the default promotion threshold.
pub const REFLECTION_IMPORTANCE: f64 = 65.0;

/// How far a reflection nudges a trait target away from its current value.
pub const DRIFT_STEP: f64 = 10.0;

const REFLECTION_MEMORIES: usize = 10;
const REFLECTION_THOUGHTS: usize = 5;
const TREND_WINDOW: usize = 5;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Who an entity is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Role or occupation.
    pub role: String,
    /// Short life story.
    #[serde(default)]
    pub biography: Option<String>,
    /// What the entity is working toward.
    #[serde(default)]
    pub goals: Vec<String>,
    /// What the entity holds to be true.
    #[serde(default)]
    pub beliefs: Vec<String>,
    /// What the entity cares about.
    #[serde(default)]
    pub values: Vec<String>,
    /// Known relationships, participant id → label. Seeds new contexts.
    #[serde(default)]
    pub relationships: BTreeMap<String, String>,
}

impl Identity {
    /// Identity with just a name and role.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one [`Entity::respond`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    /// The entity's reply.
    pub response: String,
    /// Mood after taking in the input.
    pub mood: Mood,
    /// Thoughts produced during this interaction.
    pub thoughts: Vec<Thought>,
    /// Memories created from the input.
    pub memories: Vec<MemoryRecord>,
    /// Earlier memories that informed the reply, best first.
    pub recalled: Vec<MemoryRecord>,
    /// How the input was read.
    pub impact: EmotionalImpact,
    /// How the reply was styled.
    pub style: ResponseStyle,
}

/// Outcome of [`Entity::reflect`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    /// When the reflection happened.
    pub timestamp: DateTime<Utc>,
    /// Insights drawn from recent experience.
    pub insights: Vec<String>,
    /// Most frequent recent mood, if the mood changed at all lately.
    pub mood_trend: Option<Mood>,
    /// The memories reflected on, newest first.
    pub recent_memories: Vec<MemoryRecord>,
    /// The thoughts reflected on, newest first.
    pub recent_thoughts: Vec<Thought>,
    /// Trait targets the reflection drifted toward.
    pub drift: TraitDelta,
    /// The semantic memory the reflection was stored as.
    pub memory: MemoryRecord,
}

/// Point-in-time view of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Entity identifier.
    pub id: EntityId,
    /// Who the entity is.
    pub identity: Identity,
    /// Current mood.
    pub mood: Mood,
    /// Full emotional state.
    pub emotional_state: EmotionalState,
    /// Current traits.
    pub personality: PersonalityVector,
    /// Human-readable personality summary.
    pub description: String,
    /// Memory statistics.
    pub memory: MemoryStats,
    /// Number of participants the entity has talked to.
    pub contexts: usize,
    /// Simulated clock.
    pub clock: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Consuming builder for [`Entity`].
///
/// Anything not set falls back to [`AnimaConfig`] defaults. Numeric inputs
/// are clamped, never rejected.
pub struct EntityBuilder {
    identity: Identity,
    personality: PersonalityVector,
    emotional_state: EmotionalState,
    config: AnimaConfig,
    empathy_level: Option<f64>,
    learning_rate: Option<f64>,
    seed: Option<u64>,
    start_time: Option<DateTime<Utc>>,
    classifier: Option<Box<dyn ImpactClassifier>>,
    composer: Option<Box<dyn ResponseComposer>>,
}

impl EntityBuilder {
    /// Start building an entity called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name, role),
            personality: PersonalityVector::default(),
            emotional_state: EmotionalState::default(),
            config: AnimaConfig::default(),
            empathy_level: None,
            learning_rate: None,
            seed: None,
            start_time: None,
            classifier: None,
            composer: None,
        }
    }

    /// Replace the whole identity. Keeps nothing from `new`.
    #[must_use]
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the biography.
    #[must_use]
    pub fn biography(mut self, biography: impl Into<String>) -> Self {
        self.identity.biography = Some(biography.into());
        self
    }

    /// Add a goal.
    #[must_use]
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.identity.goals.push(goal.into());
        self
    }

    /// Add a belief.
    #[must_use]
    pub fn belief(mut self, belief: impl Into<String>) -> Self {
        self.identity.beliefs.push(belief.into());
        self
    }

    /// Add a value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.identity.values.push(value.into());
        self
    }

    /// Pre-seed the relationship label for a participant.
    #[must_use]
    pub fn relationship(
        mut self,
        participant_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.identity
            .relationships
            .insert(participant_id.into(), label.into());
        self
    }

    /// Starting personality.
    #[must_use]
    pub fn personality(mut self, personality: PersonalityVector) -> Self {
        self.personality = personality;
        self
    }

    /// Starting emotional state.
    #[must_use]
    pub fn emotional_state(mut self, state: EmotionalState) -> Self {
        self.emotional_state = state;
        self
    }

    /// Override the starting mood label without touching the scalars.
    #[must_use]
    pub fn initial_mood(mut self, mood: Mood) -> Self {
        self.emotional_state = self.emotional_state.with_mood(mood);
        self
    }

    /// Capacities, pacing and defaults.
    #[must_use]
    pub fn config(mut self, config: AnimaConfig) -> Self {
        self.config = config;
        self
    }

    /// Empathy level (0–100).
    #[must_use]
    pub fn empathy_level(mut self, level: f64) -> Self {
        self.empathy_level = Some(level);
        self
    }

    /// Personality adaptation rate (0–100).
    #[must_use]
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = Some(rate);
        self
    }

    /// Seed the random source for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Starting point of the simulated clock. Defaults to now.
    #[must_use]
    pub fn start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Replace the built-in lexicon classifier.
    #[must_use]
    pub fn classifier(mut self, classifier: impl ImpactClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Replace the built-in template composer.
    #[must_use]
    pub fn composer(mut self, composer: impl ResponseComposer + 'static) -> Self {
        self.composer = Some(Box::new(composer));
        self
    }

    /// Build the entity.
    #[must_use]
    pub fn build(self) -> Entity {
        let Self {
            identity,
            personality,
            emotional_state,
            config,
            empathy_level,
            learning_rate,
            seed,
            start_time,
            classifier,
            composer,
        } = self;

        let seed = seed.or(config.entity.seed);
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let learning_rate = learning_rate.unwrap_or(config.personality.adaptation_rate);
        let empathy_level = clamp_percent(empathy_level.unwrap_or(config.entity.empathy_level));

        let entity = Entity {
            id: EntityId::new(),
            identity,
            memory: MemoryStore::new(config.memory.clone()),
            mood: MoodEngine::new(emotional_state, config.mood.clone()),
            personality: PersonalityModel::new(personality, learning_rate),
            contexts: HashMap::new(),
            empathy_level,
            clock: start_time.unwrap_or_else(Utc::now),
            rng,
            classifier: classifier.unwrap_or_else(|| Box::new(LexiconClassifier::new())),
            composer: composer.unwrap_or_else(|| Box::new(TemplateComposer)),
            config,
        };
        info!(
            entity = %entity.identity.name,
            id = %entity.id,
            mood = %entity.mood.mood(),
            seeded = seed.is_some(),
            "Entity created"
        );
        entity
    }
}

impl fmt::Debug for EntityBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityBuilder")
            .field("identity", &self.identity)
            .field("personality", &self.personality)
            .field("emotional_state", &self.emotional_state)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A persistent cognitive/affective agent.
pub struct Entity {
    id: EntityId,
    identity: Identity,
    memory: MemoryStore,
    mood: MoodEngine,
    personality: PersonalityModel,
    contexts: HashMap<String, ConversationContext>,
    empathy_level: f64,
    clock: DateTime<Utc>,
    rng: StdRng,
    classifier: Box<dyn ImpactClassifier>,
    composer: Box<dyn ResponseComposer>,
    config: AnimaConfig,
}

impl Entity {
    /// Start building an entity.
    #[must_use]
    pub fn builder(name: impl Into<String>, role: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(name, role)
    }

    /// Rebuild an entity from a snapshot with built-in classifier and composer.
    #[must_use]
    pub fn from_snapshot(snapshot: EntitySnapshot, config: AnimaConfig) -> Self {
        let mut entity = EntityBuilder::new(String::new(), String::new())
            .config(config)
            .start_time(snapshot.clock)
            .build();
        entity.import(snapshot);
        entity
    }

    /// Rebuild an entity from [`Entity::to_json`] output.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::Serialization`] if `json` is not a valid snapshot.
    pub fn from_json(json: &str, config: AnimaConfig) -> Result<Self> {
        let snapshot: EntitySnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot, config))
    }

    // -- accessors ----------------------------------------------------------

    /// Entity identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Who the entity is.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The entity's memories.
    #[must_use]
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Mutable access to the memories, for host-side seeding.
    pub fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    /// The entity's mood engine.
    #[must_use]
    pub fn mood(&self) -> &MoodEngine {
        &self.mood
    }

    /// The entity's personality.
    #[must_use]
    pub fn personality(&self) -> &PersonalityModel {
        &self.personality
    }

    /// Empathy level (0–100).
    #[must_use]
    pub fn empathy_level(&self) -> f64 {
        self.empathy_level
    }

    /// Current simulated time.
    #[must_use]
    pub fn clock(&self) -> DateTime<Utc> {
        self.clock
    }

    /// Configuration the entity was built with.
    #[must_use]
    pub fn config(&self) -> &AnimaConfig {
        &self.config
    }

    /// Point-in-time view of the entity.
    #[must_use]
    pub fn state(&self) -> EntityState {
        EntityState {
            id: self.id,
            identity: self.identity.clone(),
            mood: self.mood.mood(),
            emotional_state: *self.mood.state(),
            personality: self.personality.traits().clone(),
            description: self.personality.description(),
            memory: self.memory.stats(),
            contexts: self.contexts.len(),
            clock: self.clock,
        }
    }

    /// Conversation context for a participant.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::ParticipantNotFound`] if the entity has never
    /// talked to `participant_id`.
    pub fn context(&self, participant_id: &str) -> Result<&ConversationContext> {
        self.contexts
            .get(participant_id)
            .ok_or_else(|| AnimaError::ParticipantNotFound(participant_id.to_string()))
    }

    /// Participant ids the entity has talked to, sorted.
    #[must_use]
    pub fn participants(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Relabel the relationship with a participant.
    ///
    /// The label is also remembered in the identity so it survives the
    /// context being recreated.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::ParticipantNotFound`] if the entity has never
    /// talked to `participant_id`.
    pub fn set_relationship(
        &mut self,
        participant_id: &str,
        label: impl Into<String>,
    ) -> Result<()> {
        let context = self
            .contexts
            .get_mut(participant_id)
            .ok_or_else(|| AnimaError::ParticipantNotFound(participant_id.to_string()))?;
        let label = label.into();
        context.relationship.clone_from(&label);
        self.identity
            .relationships
            .insert(participant_id.to_string(), label);
        Ok(())
    }

    // -- interaction --------------------------------------------------------

    /// Respond to `input` from a participant.
    pub fn respond(
        &mut self,
        input: &str,
        participant_id: &str,
        participant_name: &str,
    ) -> InteractionResult {
        let now = self.clock;

        // 1. context
        self.ensure_context(participant_id, participant_name);

        // 2–3. impact and mood
        let impact = self.classifier.classify(input);
        let stimulus = impact
            .stimulus()
            .with_context(format!("conversation with {participant_name}"));
        let mood = self.mood.update_mood(&stimulus, now);

        // 4. remember the input
        let input_record = self.memory.store(
            input,
            MemoryCategory::Episodic,
            impact.importance,
            impact.weight,
            ["conversation", participant_id, "input"],
            now,
        );

        // 6. thoughts
        let mut thoughts = Vec::new();
        if let Some(thought) =
            self.mood
                .generate_internal_monologue(Some(participant_id), now, &mut self.rng)
        {
            thoughts.push(thought);
        }
        if input.contains('?') {
            thoughts.push(self.mood.add_thought(
                format!("{participant_name} asked me something. I want to answer it well."),
                ThoughtCategory::Observation,
                vec![participant_id.to_string()],
                now,
            ));
        }

        // 5, 7–8. recall, style, compose
        let (response, style, recalled) = {
            let hits: Vec<&MemoryRecord> = self
                .memory
                .recall(
                    input,
                    self.config.memory.recall_limit,
                    self.config.memory.recall_min_importance,
                    now,
                )
                .into_iter()
                .filter(|r| r.id != input_record.id)
                .collect();
            let style = self
                .personality
                .derive_response_style(self.mood.state(), self.contexts.get(participant_id));
            let request = CompositionRequest {
                input,
                participant_name,
                entity_name: &self.identity.name,
                mood,
                impact: &impact,
                style: &style,
                traits: self.personality.traits(),
                empathy_level: self.empathy_level,
                memories: &hits,
            };
            let response = self.composer.compose(&request);
            let recalled: Vec<MemoryRecord> = hits.into_iter().cloned().collect();
            (response, style, recalled)
        };

        // 9. remember the reply
        let response_record = self.memory.store(
            response.as_str(),
            MemoryCategory::Episodic,
            RESPONSE_IMPORTANCE,
            impact.weight * 0.5,
            ["conversation", participant_id, "response"],
            now,
        );
        self.memory.associate(input_record.id, response_record.id);

        // 10. history
        if let Some(context) = self.contexts.get_mut(participant_id) {
            context.push_exchange(input, response.as_str(), now);
        }

        debug!(
            entity = %self.identity.name,
            participant = participant_id,
            polarity = %impact.polarity,
            %mood,
            recalled = recalled.len(),
            "Responded"
        );

        // 11.
        InteractionResult {
            response,
            mood,
            thoughts,
            memories: vec![input_record],
            recalled,
            impact,
            style,
        }
    }

    /// Look back over recent experience, drift personality, and remember
    /// the reflection as a semantic memory.
    pub fn reflect(&mut self) -> Reflection {
        let now = self.clock;

        let recent_memories: Vec<MemoryRecord> = self
            .memory
            .recent(REFLECTION_MEMORIES)
            .into_iter()
            .cloned()
            .collect();
        let recent_thoughts: Vec<Thought> = self
            .mood
            .recent_thoughts(REFLECTION_THOUGHTS)
            .into_iter()
            .cloned()
            .collect();
        let day = self.mood.history_since(now - Duration::hours(24));
        let window: Vec<&MoodHistoryEntry> = day.into_iter().rev().take(TREND_WINDOW).collect();

        let mut insights = Vec::new();
        let significant = recent_memories
            .iter()
            .filter(|m| m.emotional_weight.abs() > 50.0)
            .count();
        if significant > 3 {
            insights.push("I've had many emotionally significant experiences lately.".to_string());
        }
        let reflective = recent_thoughts
            .iter()
            .filter(|t| t.category == ThoughtCategory::Reflection)
            .count();
        if reflective > 2 {
            insights.push("I've been doing a lot of reflecting.".to_string());
        }
        if insights.is_empty() {
            insights.push("Things have been fairly steady.".to_string());
        }

        let mood_trend = dominant_mood(&window);
        let drift = self.drift_targets(&recent_memories);
        if !drift.is_empty() {
            self.personality.update_traits(&drift);
        }

        let mut summary = format!("Looking back: {}", insights.join(" "));
        if let Some(trend) = mood_trend {
            summary.push_str(&format!(" Lately I have mostly felt {trend}."));
        }
        self.mood.add_thought(
            summary.as_str(),
            ThoughtCategory::Reflection,
            vec!["reflection".to_string()],
            now,
        );
        let memory = self.memory.store(
            summary,
            MemoryCategory::Semantic,
            REFLECTION_IMPORTANCE,
            0.0,
            ["reflection"],
            now,
        );

        info!(
            entity = %self.identity.name,
            insights = insights.len(),
            trend = ?mood_trend,
            drifted = !drift.is_empty(),
            "Reflection complete"
        );

        Reflection {
            timestamp: now,
            insights,
            mood_trend,
            recent_memories,
            recent_thoughts,
            drift,
            memory,
        }
    }

    /// Advance the simulated clock and let the mood decay accordingly.
    ///
    /// Negative durations are treated as zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn simulate_time_passage(&mut self, minutes: f64) -> Mood {
        let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
        let millis = (minutes * 60_000.0).round() as i64;
        if let Some(later) = self
            .clock
            .checked_add_signed(Duration::milliseconds(millis))
        {
            self.clock = later;
        }
        self.mood.simulate_time_passage(minutes, self.clock)
    }

    // -- snapshots ----------------------------------------------------------

    /// Snapshot the entity.
    #[must_use]
    pub fn export(&self) -> EntitySnapshot {
        let mut contexts: Vec<ConversationContext> = self.contexts.values().cloned().collect();
        contexts.sort_by(|a, b| a.participant_id.cmp(&b.participant_id));
        EntitySnapshot {
            version: SNAPSHOT_VERSION,
            id: self.id,
            identity: self.identity.clone(),
            personality: self.personality.traits().clone(),
            learning_rate: self.personality.adaptation_rate(),
            emotional_state: *self.mood.state(),
            memories: self.memory.export(),
            contexts,
            empathy_level: self.empathy_level,
            clock: self.clock,
        }
    }

    /// Replace the entity's state with a snapshot.
    ///
    /// The classifier, composer, random source and configuration are kept,
    /// as are mood history and buffered thoughts.
    pub fn import(&mut self, snapshot: EntitySnapshot) {
        let EntitySnapshot {
            id,
            identity,
            personality,
            learning_rate,
            emotional_state,
            memories,
            contexts,
            empathy_level,
            clock,
            ..
        } = snapshot;

        self.id = id;
        self.identity = identity;
        self.personality = PersonalityModel::new(personality, learning_rate);
        self.mood.restore(emotional_state);
        let report = self.memory.import(memories);
        self.contexts = contexts
            .into_iter()
            .map(|c| (c.participant_id.clone(), c))
            .collect();
        self.empathy_level = clamp_percent(empathy_level);
        self.clock = clock;

        info!(
            entity = %self.identity.name,
            id = %self.id,
            memories = self.memory.len(),
            contexts = self.contexts.len(),
            deleted = report.deleted.len(),
            "Entity imported"
        );
    }

    /// Snapshot the entity as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AnimaError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    // -- internals ----------------------------------------------------------

    fn ensure_context(&mut self, participant_id: &str, participant_name: &str) {
        if let Some(context) = self.contexts.get_mut(participant_id) {
            if context.participant_name != participant_name {
                context.participant_name = participant_name.to_string();
            }
            return;
        }
        let mut context = ConversationContext::new(participant_id, participant_name);
        if let Some(label) = self.identity.relationships.get(participant_id) {
            context.relationship.clone_from(label);
        }
        debug!(
            entity = %self.identity.name,
            participant = participant_id,
            "New conversation context"
        );
        self.contexts.insert(participant_id.to_string(), context);
    }

    /// A majority of positively weighted memories nudges extraversion up and
    /// neuroticism down; a negative majority nudges neuroticism up. Ties
    /// and empty windows leave traits alone.
    fn drift_targets(&self, memories: &[MemoryRecord]) -> TraitDelta {
        let positive = memories.iter().filter(|m| m.emotional_weight > 0.0).count();
        let negative = memories.iter().filter(|m| m.emotional_weight < 0.0).count();
        let traits = self.personality.traits();
        if positive > negative {
            TraitDelta::default()
                .with(Trait::Extraversion, traits.extraversion + DRIFT_STEP)
                .with(Trait::Neuroticism, traits.neuroticism - DRIFT_STEP)
        } else if negative > positive {
            TraitDelta::default().with(Trait::Neuroticism, traits.neuroticism + DRIFT_STEP)
        } else {
            TraitDelta::default()
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("mood", &self.mood.mood())
            .field("memories", &self.memory.len())
            .field("contexts", &self.contexts.len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// Most frequent mood in a newest-first window. Ties go to the most recent.
fn dominant_mood(window: &[&MoodHistoryEntry]) -> Option<Mood> {
    let mut counts: BTreeMap<Mood, usize> = BTreeMap::new();
    for entry in window {
        *counts.entry(entry.mood).or_default() += 1;
    }
    let mut best: Option<(Mood, usize)> = None;
    for entry in window {
        let count = counts.get(&entry.mood).copied().unwrap_or_default();
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((entry.mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Speaker;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("valid date")
    }

    fn ada() -> Entity {
        Entity::builder("Ada", "librarian")
            .seed(42)
            .start_time(start())
            .build()
    }

    #[test]
    fn respond_runs_the_pipeline() {
        let mut entity = ada();
        let result = entity.respond("I'm so happy, what a great day!", "p1", "Sam");

        assert_eq!(result.mood, Mood::Joyful);
        assert_eq!(result.memories.len(), 1);
        let input = &result.memories[0];
        assert_eq!(input.category, MemoryCategory::Episodic);
        assert!(input.has_tag("input") && input.has_tag("p1") && input.has_tag("conversation"));
        assert!(!result.response.is_empty());

        // Input and reply are both remembered and linked.
        assert_eq!(entity.memory().len(), 2);
        let linked = entity.memory().associated(input.id).expect("input stored");
        assert_eq!(linked.len(), 1);
        assert!(linked[0].has_tag("response"));
        assert!((linked[0].importance - RESPONSE_IMPORTANCE).abs() < f64::EPSILON);
        assert!((linked[0].emotional_weight - input.emotional_weight * 0.5).abs() < 1e-9);

        let context = entity.context("p1").expect("context created");
        assert_eq!(context.history.len(), 2);
        assert_eq!(context.history[0].speaker, Speaker::Participant);
        assert_eq!(context.history[1].speaker, Speaker::Entity);
    }

    #[test]
    fn questions_are_noted_and_monologue_is_rate_limited() {
        let mut entity = ada();
        let first = entity.respond("How are you?", "p1", "Sam");
        assert_eq!(first.thoughts.len(), 2);
        assert_eq!(
            first.thoughts.last().map(|t| t.category),
            Some(ThoughtCategory::Observation)
        );

        // Same simulated instant: no second spontaneous thought.
        let second = entity.respond("Still there?", "p1", "Sam");
        assert_eq!(second.thoughts.len(), 1);

        entity.simulate_time_passage(1.0);
        let third = entity.respond("Nice weather today", "p1", "Sam");
        assert_eq!(third.thoughts.len(), 1);
    }

    #[test]
    fn recalled_memories_exclude_the_input() {
        let mut entity = ada();
        entity.respond("I visited the lighthouse yesterday", "p1", "Sam");
        let result = entity.respond("lighthouse", "p1", "Sam");
        assert!(!result.recalled.is_empty());
        assert!(result.recalled.iter().all(|m| m.id != result.memories[0].id));
        assert!(result.recalled[0].content.contains("lighthouse"));
    }

    #[test]
    fn identity_relationships_seed_new_contexts() {
        let mut entity = Entity::builder("Ada", "librarian")
            .relationship("p2", "friend")
            .seed(1)
            .start_time(start())
            .build();
        entity.respond("hello", "p2", "Kim");
        assert_eq!(entity.context("p2").expect("context").relationship, "friend");
        entity.respond("hello", "p3", "Lee");
        assert_eq!(entity.context("p3").expect("context").relationship, "acquaintance");
    }

    #[test]
    fn set_relationship_requires_a_known_participant() {
        let mut entity = ada();
        assert!(matches!(
            entity.set_relationship("ghost", "friend"),
            Err(AnimaError::ParticipantNotFound(_))
        ));
        entity.respond("hi", "p1", "Sam");
        entity.set_relationship("p1", "family").expect("known participant");
        assert_eq!(entity.context("p1").expect("context").relationship, "family");
        assert_eq!(entity.identity().relationships.get("p1").map(String::as_str), Some("family"));
    }

    #[test]
    fn time_passage_advances_the_clock() {
        let mut entity = ada();
        entity.simulate_time_passage(90.0);
        assert_eq!(entity.clock(), start() + Duration::minutes(90));
        entity.simulate_time_passage(-5.0);
        assert_eq!(entity.clock(), start() + Duration::minutes(90));
    }

    #[test]
    fn reflection_stores_a_semantic_memory() {
        let mut entity = ada();
        entity.respond("I'm so happy, what a great day!", "p1", "Sam");
        let before = entity.personality().traits().clone();
        let reflective_before = entity
            .mood()
            .thoughts_by_category(ThoughtCategory::Reflection)
            .len();
        let reflection = entity.reflect();

        assert_eq!(reflection.memory.category, MemoryCategory::Semantic);
        assert!(reflection.memory.has_tag("reflection"));
        assert_eq!(reflection.mood_trend, Some(Mood::Joyful));
        assert!(reflection.drift.get(Trait::Extraversion).is_some());

        let after = entity.personality().traits();
        assert!(after.extraversion > before.extraversion);
        assert!(after.neuroticism < before.neuroticism);
        assert_eq!(
            entity.mood().thoughts_by_category(ThoughtCategory::Reflection).len(),
            reflective_before + 1
        );
    }

    #[test]
    fn drift_follows_memories_even_without_mood_changes() {
        let mut entity = Entity::builder("Ada", "librarian")
            .emotional_state(EmotionalState::new(85.0, 10.0, 75.0, 70.0))
            .seed(4)
            .start_time(start())
            .build();
        for text in ["what a great day", "I love this", "thank you, wonderful", "so happy"] {
            entity.respond(text, "p1", "Sam");
        }
        assert!(entity.mood().history().is_empty());
        let before = entity.personality().traits().clone();

        let reflection = entity.reflect();

        assert!(reflection.mood_trend.is_none());
        assert!(!reflection.drift.is_empty());
        let after = entity.personality().traits();
        assert!(after.extraversion > before.extraversion);
        assert!(after.neuroticism < before.neuroticism);
    }

    #[test]
    fn drift_ignores_neutral_and_tied_memories() {
        let entity = ada();
        let now = start();
        let record = |weight| {
            MemoryRecord::new("m", MemoryCategory::Episodic, 50.0, weight, ["t"], now)
        };
        let tied = [record(40.0), record(-40.0), record(0.0)];
        assert!(entity.drift_targets(&tied).is_empty());

        let negative = [record(-40.0), record(-10.0), record(30.0)];
        let drift = entity.drift_targets(&negative);
        assert!(drift.get(Trait::Extraversion).is_none());
        assert!(drift.get(Trait::Neuroticism).is_some());
    }

    #[test]
    fn import_restores_state_but_keeps_mood_history() {
        let mut entity = ada();
        entity.respond("I'm so happy, what a great day!", "p1", "Sam");
        let history = entity.mood().history().len();
        assert!(history > 0);

        let mut snapshot = entity.export();
        snapshot.emotional_state.stress = 250.0;
        snapshot.emotional_state.mood = Mood::Calm;
        entity.import(snapshot);

        let state = entity.mood().state();
        assert!((state.stress - 100.0).abs() < f64::EPSILON);
        assert_eq!(state.mood, Mood::Calm);
        assert_eq!(entity.mood().history().len(), history);
        assert_eq!(entity.memory().len(), 2);
    }

    #[test]
    fn quiet_reflection_is_steady() {
        let mut entity = ada();
        let reflection = entity.reflect();
        assert_eq!(reflection.insights, vec!["Things have been fairly steady.".to_string()]);
        assert!(reflection.mood_trend.is_none());
        assert!(reflection.drift.is_empty());
    }

    #[test]
    fn dominant_mood_prefers_recent_on_ties() {
        let state = EmotionalState::default();
        let entry = |mood| MoodHistoryEntry {
            mood,
            timestamp: start(),
            state,
            trigger: None,
        };
        let calm = entry(Mood::Calm);
        let anxious = entry(Mood::Anxious);
        // Newest first.
        assert_eq!(dominant_mood(&[&anxious, &calm]), Some(Mood::Anxious));
        assert_eq!(dominant_mood(&[&anxious, &calm, &calm]), Some(Mood::Calm));
        assert_eq!(dominant_mood(&[]), None);
    }
}
