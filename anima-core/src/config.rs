//! Configuration for an ANIMA entity.
//!
//! Maps directly to `anima.toml`. Every section is optional; missing
//! keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Top-level ANIMA configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimaConfig {
    /// Memory store capacities and eviction policy.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Mood engine bounds and thought pacing.
    #[serde(default)]
    pub mood: MoodConfig,
    /// Personality adaptation.
    #[serde(default)]
    pub personality: PersonalityConfig,
    /// Orchestrator scalars.
    #[serde(default)]
    pub entity: EntityConfig,
}

impl AnimaConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AnimaError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::AnimaError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Which long-term records are forgotten first when the long-term list overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongTermEviction {
    /// Drop the oldest promoted records regardless of importance.
    #[default]
    Recency,
    /// Drop the least important records; ties go to the oldest.
    LowestImportance,
}

/// Memory store capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Working-list size before consolidation demotes records.
    #[serde(default = "default_50")]
    pub short_term_capacity: usize,
    /// Long-term list size before eviction.
    #[serde(default = "default_1000")]
    pub long_term_capacity: usize,
    /// Demoted records at or above this importance are promoted instead of deleted.
    #[serde(default = "default_60")]
    pub promotion_threshold: f64,
    /// Long-term eviction policy.
    #[serde(default)]
    pub long_term_eviction: LongTermEviction,
    /// Memories recalled per interaction.
    #[serde(default = "default_5")]
    pub recall_limit: usize,
    /// Minimum importance for a memory to be recalled during an interaction.
    #[serde(default = "default_30")]
    pub recall_min_importance: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 50,
            long_term_capacity: 1000,
            promotion_threshold: 60.0,
            long_term_eviction: LongTermEviction::Recency,
            recall_limit: 5,
            recall_min_importance: 30.0,
        }
    }
}

/// Mood engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Minimum seconds between two spontaneous thoughts.
    #[serde(default = "default_30_u64")]
    pub thought_interval_secs: u64,
    /// Thought buffer soft cap.
    #[serde(default = "default_100")]
    pub thought_cap: usize,
    /// Thoughts kept when the soft cap is exceeded.
    #[serde(default = "default_50")]
    pub thought_keep: usize,
    /// Mood history cap.
    #[serde(default = "default_200")]
    pub history_cap: usize,
    /// History entries kept when the cap is exceeded.
    #[serde(default = "default_100")]
    pub history_keep: usize,
    /// Points a neutral stimulus moves each scalar toward its baseline.
    #[serde(default = "default_5_f64")]
    pub neutral_step: f64,
    /// Only allow transitions along the mood adjacency table; anything else lands on neutral.
    #[serde(default)]
    pub enforce_adjacency: bool,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            thought_interval_secs: 30,
            thought_cap: 100,
            thought_keep: 50,
            history_cap: 200,
            history_keep: 100,
            neutral_step: 5.0,
            enforce_adjacency: false,
        }
    }
}

/// Personality adaptation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityConfig {
    /// Percentage of the gap to a target value closed per trait update (0–100).
    #[serde(default = "default_10_f64")]
    pub adaptation_rate: f64,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            adaptation_rate: 10.0,
        }
    }
}

/// Orchestrator scalars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    /// How strongly the entity acknowledges the participant's feelings (0–100).
    #[serde(default = "default_50_f64")]
    pub empathy_level: f64,
    /// Seed for the entity's random source. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            empathy_level: 50.0,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_5() -> usize { 5 }
fn default_50() -> usize { 50 }
fn default_100() -> usize { 100 }
fn default_200() -> usize { 200 }
fn default_1000() -> usize { 1000 }
fn default_30_u64() -> u64 { 30 }
fn default_5_f64() -> f64 { 5.0 }
fn default_10_f64() -> f64 { 10.0 }
fn default_30() -> f64 { 30.0 }
fn default_50_f64() -> f64 { 50.0 }
fn default_60() -> f64 { 60.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = AnimaConfig::from_toml("").expect("empty config parses");
        assert_eq!(config.memory.short_term_capacity, 50);
        assert_eq!(config.memory.long_term_capacity, 1000);
        assert_eq!(config.mood.thought_interval_secs, 30);
        assert_eq!(config.memory.long_term_eviction, LongTermEviction::Recency);
        assert!(!config.mood.enforce_adjacency);
    }

    #[test]
    fn partial_sections_override_only_given_keys() {
        let config = AnimaConfig::from_toml(
            r#"
            [memory]
            short_term_capacity = 10
            long_term_eviction = "lowest_importance"

            [entity]
            seed = 7
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.memory.short_term_capacity, 10);
        assert_eq!(config.memory.long_term_capacity, 1000);
        assert_eq!(config.memory.long_term_eviction, LongTermEviction::LowestImportance);
        assert_eq!(config.entity.seed, Some(7));
        assert!((config.entity.empathy_level - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn host_sections_are_ignored() {
        let config = AnimaConfig::from_toml("[general]\nlog_level = \"debug\"\n")
            .expect("unknown sections are tolerated");
        assert_eq!(config.memory.short_term_capacity, 50);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = AnimaConfig::from_toml("[memory\nshort_term_capacity = ")
            .expect_err("truncated toml must fail");
        assert!(matches!(err, crate::AnimaError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("anima.toml");
        std::fs::write(&path, "[mood]\nthought_interval_secs = 5\n").expect("write");
        let config = AnimaConfig::from_file(&path).expect("load");
        assert_eq!(config.mood.thought_interval_secs, 5);
    }
}
