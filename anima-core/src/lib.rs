//! # ANIMA Core Library
//!
//! A persistent cognitive/affective entity: an agent that accumulates
//! memories, carries an emotional state and a personality, and lets all
//! three shape how it answers over repeated conversations.
//!
//! - **Memory** — what happened, ranked by relevance and consolidated from
//!   short-term into long-term storage ([`MemoryStore`])
//! - **Mood** — a continuous emotional state classified into one of ten
//!   moods, with an internal monologue ([`MoodEngine`])
//! - **Personality** — a Big Five vector that drifts slowly and decides
//!   how the entity speaks ([`PersonalityModel`])
//! - **Entity** — the orchestrator running the interaction pipeline
//!   ([`Entity`], [`EntityRegistry`])
//!
//! ## Determinism
//!
//! Nothing reads the wall clock or OS entropy once an entity is built with
//! a seed and a start time. Time moves only through
//! [`Entity::simulate_time_passage`]; every random choice goes through the
//! entity's own seeded generator.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod consolidation;
pub mod context;
pub mod entity;
pub mod error;
pub mod memory;
pub mod mood;
pub mod personality;
pub mod registry;
pub mod retrieval;
pub mod types;

pub use config::AnimaConfig;
pub use context::ConversationContext;
pub use entity::{Entity, EntityBuilder, EntitySnapshot, InteractionResult, Reflection};
pub use error::{AnimaError, Result};
pub use memory::record::{MemoryCategory, MemoryRecord};
pub use memory::{MemorySnapshot, MemoryStore};
pub use mood::{EmotionalState, Mood, MoodEngine, Thought, ThoughtCategory};
pub use personality::{PersonalityModel, PersonalityVector, Trait, TraitDelta};
pub use registry::EntityRegistry;
pub use types::*;
