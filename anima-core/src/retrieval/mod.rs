//! Memory Recall — keyword relevance ranking.
//!
//! Candidates below the importance floor are skipped, survivors are
//! scored with [`scoring::compute_breakdown`], records scoring zero are
//! dropped, and the rest are returned best-first. Ties keep candidate
//! order, so callers that pass newest-first lists get newest-first ties.

pub mod scoring;

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use tracing::trace;

use crate::memory::MemoryRecord;

/// A scored recall result.
#[derive(Debug, Clone)]
pub struct RecallResult<'a> {
    /// The recalled record.
    pub record: &'a MemoryRecord,
    /// Combined relevance score.
    pub score: f64,
    /// Per-factor breakdown.
    pub breakdown: ScoreBreakdown,
}

/// Breakdown of a relevance score into its component factors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Content match contribution (0 or 100).
    pub content: f64,
    /// Tag match contribution (50 per matching tag).
    pub tags: f64,
    /// Importance contribution.
    pub importance: f64,
    /// Recency bonus.
    pub recency: f64,
}

impl ScoreBreakdown {
    /// Sum of all factors.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.content + self.tags + self.importance + self.recency
    }
}

/// Rank `candidates` against `query`.
///
/// Returns at most `limit` results, highest score first.
pub fn rank<'a, I>(
    candidates: I,
    query: &str,
    limit: usize,
    min_importance: f64,
    now: DateTime<Utc>,
) -> Vec<RecallResult<'a>>
where
    I: IntoIterator<Item = &'a MemoryRecord>,
{
    let query_lower = query.to_lowercase();

    let mut results: Vec<RecallResult<'a>> = candidates
        .into_iter()
        .filter(|record| record.importance >= min_importance)
        .filter_map(|record| {
            let breakdown = scoring::compute_breakdown(record, &query_lower, now);
            let score = breakdown.total();
            (score > 0.0).then_some(RecallResult {
                record,
                score,
                breakdown,
            })
        })
        .collect();

    // Stable sort: equal scores keep candidate order.
    results.sort_by_key(|r| Reverse(OrderedFloat(r.score)));
    results.truncate(limit);

    trace!(query, hits = results.len(), "Ranked recall candidates");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCategory;
    use chrono::Duration;

    #[test]
    fn filters_by_importance_and_truncates() {
        let now = Utc::now();
        let records: Vec<MemoryRecord> = (0..10)
            .map(|i| {
                MemoryRecord::new(
                    format!("note {i}"),
                    MemoryCategory::Semantic,
                    f64::from(i) * 10.0,
                    0.0,
                    ["note"],
                    now,
                )
            })
            .collect();

        let results = rank(&records, "note", 3, 50.0, now);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.record.importance >= 50.0));
        assert!(results[0].score >= results[1].score);
        assert!((results[0].record.importance - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_scores_are_excluded() {
        let now = Utc::now();
        let stale = MemoryRecord::new(
            "unrelated",
            MemoryCategory::Episodic,
            0.0,
            0.0,
            Vec::<String>::new(),
            now - Duration::days(90),
        );
        assert!(rank([&stale], "harbor", 5, 0.0, now).is_empty());
    }
}
