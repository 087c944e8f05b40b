//! Memory Consolidation — keeping short- and long-term memory bounded.
//!
//! Runs after every store and after import:
//!   1. Short-term overflow is cut from the tail (oldest first out).
//!      Records at or above the promotion threshold move to the front of
//!      the long-term list; the rest are forgotten.
//!   2. Long-term overflow is evicted according to [`LongTermEviction`].
//!
//! Both lists are newest-first. Every id in either list is present in
//! the primary index and no id appears in both.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::config::{LongTermEviction, MemoryConfig};
use crate::memory::MemoryRecord;
use crate::types::MemoryId;

/// What a consolidation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Records moved from short-term to long-term memory.
    pub promoted: Vec<MemoryId>,
    /// Short-term records forgotten for being unimportant.
    pub deleted: Vec<MemoryId>,
    /// Long-term records evicted for capacity.
    pub evicted: Vec<MemoryId>,
}

impl ConsolidationReport {
    /// Whether the pass changed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promoted.is_empty() && self.deleted.is_empty() && self.evicted.is_empty()
    }
}

/// Run one consolidation pass over the store's lists.
pub fn consolidate(
    index: &mut HashMap<MemoryId, MemoryRecord>,
    short_term: &mut VecDeque<MemoryId>,
    long_term: &mut VecDeque<MemoryId>,
    config: &MemoryConfig,
) -> ConsolidationReport {
    let mut report = ConsolidationReport::default();

    if short_term.len() > config.short_term_capacity {
        // Walk the overflow oldest-first so the newest promotion ends up in front.
        let overflow: Vec<MemoryId> = short_term.drain(config.short_term_capacity..).collect();
        for id in overflow.into_iter().rev() {
            let promote = index
                .get(&id)
                .is_some_and(|r| r.importance >= config.promotion_threshold);
            if promote {
                long_term.push_front(id);
                report.promoted.push(id);
            } else {
                remove_from_index(index, id);
                report.deleted.push(id);
            }
        }
    }

    while long_term.len() > config.long_term_capacity {
        let victim = match config.long_term_eviction {
            LongTermEviction::Recency => long_term.pop_back(),
            LongTermEviction::LowestImportance => {
                pop_least_important(index, long_term)
            }
        };
        let Some(id) = victim else { break };
        remove_from_index(index, id);
        report.evicted.push(id);
    }

    if !report.is_empty() {
        debug!(
            promoted = report.promoted.len(),
            deleted = report.deleted.len(),
            evicted = report.evicted.len(),
            short_term = short_term.len(),
            long_term = long_term.len(),
            "Consolidated memory"
        );
    }

    report
}

/// Remove the least important long-term id. Ties go to the oldest (back-most).
fn pop_least_important(
    index: &HashMap<MemoryId, MemoryRecord>,
    long_term: &mut VecDeque<MemoryId>,
) -> Option<MemoryId> {
    let mut victim: Option<(usize, f64)> = None;
    for (pos, id) in long_term.iter().enumerate() {
        let importance = index.get(id).map_or(0.0, |r| r.importance);
        if victim.is_none_or(|(_, lowest)| importance <= lowest) {
            victim = Some((pos, importance));
        }
    }
    victim.and_then(|(pos, _)| long_term.remove(pos))
}

/// Delete a record and every back-edge pointing at it.
pub(crate) fn remove_from_index(
    index: &mut HashMap<MemoryId, MemoryRecord>,
    id: MemoryId,
) -> Option<MemoryRecord> {
    let record = index.remove(&id)?;
    for other in &record.associations {
        if let Some(peer) = index.get_mut(other) {
            peer.associations.remove(&id);
        }
    }
    Some(record)
}
