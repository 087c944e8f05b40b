//! Memory records and the per-entity [`MemoryStore`].
//!
//! The store owns every record it creates. Records live in a primary
//! index keyed by id and are threaded through two newest-first lists:
//! a short-term working list and a long-term list. Consolidation (see
//! [`crate::consolidation`]) keeps both lists within capacity.

pub mod record;

pub use record::{MemoryCategory, MemoryRecord};

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::MemoryConfig;
use crate::consolidation::{self, ConsolidationReport};
use crate::error::{AnimaError, Result};
use crate::retrieval;
use crate::types::MemoryId;

/// Default importance boost applied by [`MemoryStore::strengthen_default`].
pub const DEFAULT_STRENGTHEN_DELTA: f64 = 10.0;

/// Summary statistics for a memory store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Total records held.
    pub total: usize,
    /// Records in the short-term working list.
    pub short_term_count: usize,
    /// Records in long-term memory.
    pub long_term_count: usize,
    /// Mean importance across all records (0 when empty).
    pub average_importance: f64,
    /// Record count per category.
    pub counts_by_category: BTreeMap<MemoryCategory, usize>,
}

/// Exported store contents, one newest-first list per tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Short-term working list.
    pub short_term: Vec<MemoryRecord>,
    /// Long-term list.
    #[serde(default)]
    pub long_term: Vec<MemoryRecord>,
}

impl MemorySnapshot {
    /// Total records across both tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.short_term.len() + self.long_term.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.short_term.is_empty() && self.long_term.is_empty()
    }
}

/// The memory store — one per entity.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    index: HashMap<MemoryId, MemoryRecord>,
    short_term: VecDeque<MemoryId>,
    long_term: VecDeque<MemoryId>,
    config: MemoryConfig,
}

impl MemoryStore {
    /// Create an empty store with the given capacities.
    #[must_use]
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            index: HashMap::new(),
            short_term: VecDeque::new(),
            long_term: VecDeque::new(),
            config,
        }
    }

    /// The store's configuration.
    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Store a new memory and consolidate.
    ///
    /// Importance and weight are clamped. The returned copy reflects the
    /// record as stored, even if consolidation immediately forgot it
    /// (only possible with a zero short-term capacity).
    pub fn store<I, S>(
        &mut self,
        content: impl Into<String>,
        category: MemoryCategory,
        importance: f64,
        emotional_weight: f64,
        tags: I,
        now: DateTime<Utc>,
    ) -> MemoryRecord
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record = MemoryRecord::new(content, category, importance, emotional_weight, tags, now);
        let stored = record.clone();
        self.short_term.push_front(record.id);
        self.index.insert(record.id, record);
        self.consolidate();
        stored
    }

    /// Rank stored memories against `query`, best first.
    ///
    /// Only records with `importance >= min_importance` are considered and
    /// records scoring zero are left out.
    #[must_use]
    pub fn recall(
        &self,
        query: &str,
        limit: usize,
        min_importance: f64,
        now: DateTime<Utc>,
    ) -> Vec<&MemoryRecord> {
        retrieval::rank(self.iter(), query, limit, min_importance, now)
            .into_iter()
            .map(|r| r.record)
            .collect()
    }

    /// Link two records symmetrically. Unknown ids and self-links are ignored.
    pub fn associate(&mut self, a: MemoryId, b: MemoryId) {
        if a == b || !self.index.contains_key(&a) || !self.index.contains_key(&b) {
            return;
        }
        if let Some(record) = self.index.get_mut(&a) {
            record.associations.insert(b);
        }
        if let Some(record) = self.index.get_mut(&b) {
            record.associations.insert(a);
        }
    }

    /// Raise a record's importance by `delta`, saturating at 100.
    ///
    /// # Errors
    /// Returns [`AnimaError::MemoryNotFound`] for an unknown id.
    pub fn strengthen(&mut self, id: MemoryId, delta: f64) -> Result<f64> {
        let record = self
            .index
            .get_mut(&id)
            .ok_or(AnimaError::MemoryNotFound(id))?;
        record.strengthen(delta);
        Ok(record.importance)
    }

    /// [`strengthen`](Self::strengthen) by the default delta of 10.
    ///
    /// # Errors
    /// Returns [`AnimaError::MemoryNotFound`] for an unknown id.
    pub fn strengthen_default(&mut self, id: MemoryId) -> Result<f64> {
        self.strengthen(id, DEFAULT_STRENGTHEN_DELTA)
    }

    /// Look up a record.
    ///
    /// # Errors
    /// Returns [`AnimaError::MemoryNotFound`] for an unknown id.
    pub fn get(&self, id: MemoryId) -> Result<&MemoryRecord> {
        self.index.get(&id).ok_or(AnimaError::MemoryNotFound(id))
    }

    /// Remove a record outright, including every association pointing at it.
    ///
    /// # Errors
    /// Returns [`AnimaError::MemoryNotFound`] for an unknown id.
    pub fn forget(&mut self, id: MemoryId) -> Result<MemoryRecord> {
        let record = consolidation::remove_from_index(&mut self.index, id)
            .ok_or(AnimaError::MemoryNotFound(id))?;
        self.short_term.retain(|other| *other != id);
        self.long_term.retain(|other| *other != id);
        Ok(record)
    }

    /// Records linked to `id`.
    ///
    /// # Errors
    /// Returns [`AnimaError::MemoryNotFound`] for an unknown id.
    pub fn associated(&self, id: MemoryId) -> Result<Vec<&MemoryRecord>> {
        let record = self.get(id)?;
        Ok(record
            .associations
            .iter()
            .filter_map(|other| self.index.get(other))
            .collect())
    }

    /// The `n` most recently created records, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&MemoryRecord> {
        let mut all: Vec<&MemoryRecord> = self.iter().collect();
        // Stable: equal timestamps keep list order.
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(n);
        all
    }

    /// Records of one category, newest first.
    #[must_use]
    pub fn by_category(&self, category: MemoryCategory) -> Vec<&MemoryRecord> {
        self.iter().filter(|r| r.category == category).collect()
    }

    /// Records carrying `tag`, newest first.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<&MemoryRecord> {
        self.iter().filter(|r| r.has_tag(tag)).collect()
    }

    /// Iterate every record: short-term first, then long-term, each newest first.
    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.short_term
            .iter()
            .chain(self.long_term.iter())
            .filter_map(|id| self.index.get(id))
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Summary statistics.
    #[must_use]
    pub fn stats(&self) -> MemoryStats {
        let total = self.index.len();
        let mut counts_by_category = BTreeMap::new();
        let mut importance_sum = 0.0;
        for record in self.iter() {
            *counts_by_category.entry(record.category).or_insert(0) += 1;
            importance_sum += record.importance;
        }
        MemoryStats {
            total,
            short_term_count: self.short_term.len(),
            long_term_count: self.long_term.len(),
            average_importance: if total == 0 {
                0.0
            } else {
                importance_sum / total as f64
            },
            counts_by_category,
        }
    }

    /// Snapshot every record, keeping each tier and its order.
    #[must_use]
    pub fn export(&self) -> MemorySnapshot {
        let collect = |ids: &VecDeque<MemoryId>| -> Vec<MemoryRecord> {
            ids.iter().filter_map(|id| self.index.get(id)).cloned().collect()
        };
        MemorySnapshot {
            short_term: collect(&self.short_term),
            long_term: collect(&self.long_term),
        }
    }

    /// Replace the store's contents with `snapshot` and consolidate.
    ///
    /// Both tiers are rebuilt in the order given, so an export from a store
    /// with the same capacities comes back unchanged. Records are
    /// re-clamped. Duplicate ids keep their first occurrence; associations
    /// to ids not present in the snapshot are dropped.
    pub fn import(&mut self, snapshot: MemorySnapshot) -> ConsolidationReport {
        self.index.clear();
        self.short_term.clear();
        self.long_term.clear();

        let MemorySnapshot {
            short_term,
            long_term,
        } = snapshot;
        for (records, promoted) in [(short_term, false), (long_term, true)] {
            for mut record in records {
                if self.index.contains_key(&record.id) {
                    warn!(id = %record.id, "Skipping duplicate memory id in import");
                    continue;
                }
                record.normalize();
                if promoted {
                    self.long_term.push_back(record.id);
                } else {
                    self.short_term.push_back(record.id);
                }
                self.index.insert(record.id, record);
            }
        }

        let known: HashSet<MemoryId> = self.index.keys().copied().collect();
        let mut dangling = 0usize;
        for record in self.index.values_mut() {
            let before = record.associations.len();
            record.associations.retain(|id| known.contains(id));
            dangling += before - record.associations.len();
        }
        if dangling > 0 {
            warn!(dangling, "Dropped associations to unknown memories during import");
        }

        self.consolidate()
    }

    fn consolidate(&mut self) -> ConsolidationReport {
        consolidation::consolidate(
            &mut self.index,
            &mut self.short_term,
            &mut self.long_term,
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const NO_TAGS: [&str; 0] = [];

    fn store_n(
        store: &mut MemoryStore,
        n: usize,
        importance: f64,
        now: DateTime<Utc>,
    ) -> Vec<MemoryId> {
        (0..n)
            .map(|i| {
                let content = format!("entry {i}");
                store
                    .store(content, MemoryCategory::Episodic, importance, 0.0, NO_TAGS, now)
                    .id
            })
            .collect()
    }

    #[test]
    fn store_clamps_and_indexes() {
        let mut store = MemoryStore::default();
        let r = store.store("hello", MemoryCategory::Emotional, 140.0, 300.0, ["x"], Utc::now());
        assert!((r.importance - 100.0).abs() < f64::EPSILON);
        assert!((r.emotional_weight - 100.0).abs() < f64::EPSILON);
        assert_eq!(store.get(r.id).expect("stored").content, "hello");
    }

    #[test]
    fn default_store_uses_default_capacities() {
        let store = MemoryStore::default();
        assert_eq!(store.config().short_term_capacity, 50);
    }

    #[test]
    fn unimportant_overflow_is_deleted() {
        let mut store = MemoryStore::new(MemoryConfig::default());
        let now = Utc::now();
        let ids = store_n(&mut store, 50, 40.0, now);
        store.store("51st", MemoryCategory::Episodic, 40.0, 0.0, NO_TAGS, now);

        let stats = store.stats();
        assert_eq!(stats.short_term_count, 50);
        assert_eq!(stats.long_term_count, 0);
        assert_eq!(stats.total, 50);
        // The oldest record fell off the tail.
        assert!(store.get(ids[0]).is_err());
    }

    #[test]
    fn important_overflow_is_promoted() {
        let mut store = MemoryStore::new(MemoryConfig::default());
        let now = Utc::now();
        let ids = store_n(&mut store, 51, 75.0, now);

        let stats = store.stats();
        assert_eq!(stats.short_term_count, 50);
        assert_eq!(stats.long_term_count, 1);
        assert!(store.get(ids[0]).is_ok());
    }

    #[test]
    fn verbatim_match_ranks_first() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        let episodic = MemoryCategory::Episodic;
        let miss = store.store("we discussed the weather", episodic, 50.0, 0.0, NO_TAGS, now);
        let hit = store.store("we discussed the garden", episodic, 50.0, 0.0, NO_TAGS, now);

        let results = store.recall("garden", 5, 0.0, now);
        assert_eq!(results[0].id, hit.id);
        assert_eq!(results[1].id, miss.id);
    }

    #[test]
    fn recall_respects_min_importance() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        store.store("garden low", MemoryCategory::Episodic, 10.0, 0.0, NO_TAGS, now);
        let high = store.store("garden high", MemoryCategory::Episodic, 90.0, 0.0, NO_TAGS, now);

        let results = store.recall("garden", 5, 30.0, now);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, high.id);
    }

    #[test]
    fn associate_is_symmetric_and_idempotent() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        let a = store.store("a", MemoryCategory::Semantic, 50.0, 0.0, NO_TAGS, now).id;
        let b = store.store("b", MemoryCategory::Semantic, 50.0, 0.0, NO_TAGS, now).id;

        store.associate(a, b);
        store.associate(b, a);
        store.associate(a, MemoryId::new());

        assert_eq!(store.get(a).expect("a").associations.len(), 1);
        assert!(store.get(b).expect("b").associations.contains(&a));
        assert_eq!(store.associated(a).expect("a").len(), 1);
    }

    #[test]
    fn strengthen_saturates_and_reports_unknown() {
        let mut store = MemoryStore::default();
        let id = store.store("x", MemoryCategory::Procedural, 95.0, 0.0, NO_TAGS, Utc::now()).id;
        assert!((store.strengthen_default(id).expect("known") - 100.0).abs() < f64::EPSILON);
        assert!(matches!(
            store.strengthen(MemoryId::new(), 5.0),
            Err(AnimaError::MemoryNotFound(_))
        ));
    }

    #[test]
    fn forget_removes_everywhere() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        let a = store.store("a", MemoryCategory::Semantic, 50.0, 0.0, NO_TAGS, now).id;
        let b = store.store("b", MemoryCategory::Semantic, 50.0, 0.0, NO_TAGS, now).id;
        store.associate(a, b);

        store.forget(a).expect("known");
        assert_eq!(store.len(), 1);
        assert!(store.get(b).expect("b").associations.is_empty());
        assert_eq!(store.stats().short_term_count, 1);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        store.store("old", MemoryCategory::Episodic, 50.0, 0.0, NO_TAGS, now - Duration::days(2));
        store.store("new", MemoryCategory::Episodic, 50.0, 0.0, NO_TAGS, now);
        let recent = store.recent(1);
        assert_eq!(recent[0].content, "new");
    }

    #[test]
    fn stats_count_categories() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        store.store("a", MemoryCategory::Semantic, 20.0, 0.0, NO_TAGS, now);
        store.store("b", MemoryCategory::Semantic, 40.0, 0.0, NO_TAGS, now);
        store.store("c", MemoryCategory::Emotional, 60.0, 0.0, ["feel"], now);

        let stats = store.stats();
        assert_eq!(stats.counts_by_category[&MemoryCategory::Semantic], 2);
        assert_eq!(stats.counts_by_category[&MemoryCategory::Emotional], 1);
        assert!((stats.average_importance - 40.0).abs() < 1e-9);
        assert_eq!(store.by_tag("feel").len(), 1);
        assert_eq!(store.by_category(MemoryCategory::Semantic).len(), 2);
    }

    #[test]
    fn export_import_round_trip() {
        let config = MemoryConfig {
            short_term_capacity: 3,
            ..MemoryConfig::default()
        };
        let mut store = MemoryStore::new(config.clone());
        let now = Utc::now();
        let ids = store_n(&mut store, 6, 80.0, now);
        store.associate(ids[0], ids[5]);

        let snapshot = store.export();
        let mut restored = MemoryStore::new(config);
        restored.import(snapshot);

        assert_eq!(restored.stats(), store.stats());
        assert!(restored.get(ids[5]).expect("kept").associations.contains(&ids[0]));
    }

    #[test]
    fn import_keeps_backdated_short_term_records() {
        let config = MemoryConfig {
            short_term_capacity: 2,
            ..MemoryConfig::default()
        };
        let mut store = MemoryStore::new(config.clone());
        let now = Utc::now();
        store.store("x", MemoryCategory::Episodic, 80.0, 0.0, NO_TAGS, now);
        store.store("y", MemoryCategory::Episodic, 80.0, 0.0, NO_TAGS, now);
        let yesterday = now - Duration::days(1);
        let z = store
            .store("z", MemoryCategory::Episodic, 40.0, 0.0, NO_TAGS, yesterday)
            .id;
        let before = store.stats();
        assert_eq!((before.total, before.short_term_count, before.long_term_count), (3, 2, 1));

        let mut restored = MemoryStore::new(config);
        let report = restored.import(store.export());

        assert!(report.is_empty());
        assert_eq!(restored.stats(), before);
        assert!(restored.get(z).is_ok());
        let order: Vec<&str> = restored.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["z", "y", "x"]);
    }

    #[test]
    fn import_into_smaller_store_consolidates() {
        let mut store = MemoryStore::default();
        let now = Utc::now();
        store_n(&mut store, 4, 80.0, now);
        store_n(&mut store, 2, 10.0, now);

        let mut small = MemoryStore::new(MemoryConfig {
            short_term_capacity: 2,
            long_term_capacity: 3,
            ..MemoryConfig::default()
        });
        let report = small.import(store.export());

        assert!(report.deleted.is_empty());
        assert_eq!(report.promoted.len(), 4);
        assert_eq!(report.evicted.len(), 1);
        let stats = small.stats();
        assert_eq!((stats.short_term_count, stats.long_term_count), (2, 3));
    }
}
