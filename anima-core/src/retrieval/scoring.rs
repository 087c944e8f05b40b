//! Per-factor scoring functions for memory recall.
//!
//! Score = ContentMatch(m) + TagMatch(m) + Importance(m) + Recency(m)
//!
//! Where:
//!   ContentMatch(m) = 100 if the query occurs in the content, else 0
//!   TagMatch(m)     = 50 × (tags containing the query)
//!   Importance(m)   = 0.5 × importance
//!   Recency(m)      = max(0, 20 − days since creation)
//!
//! Matching is case-insensitive.

use chrono::{DateTime, Utc};

use crate::memory::MemoryRecord;
use crate::retrieval::ScoreBreakdown;
use crate::types::days_between;

const CONTENT_MATCH_SCORE: f64 = 100.0;
const TAG_MATCH_SCORE: f64 = 50.0;
const IMPORTANCE_FACTOR: f64 = 0.5;
const RECENCY_WINDOW_DAYS: f64 = 20.0;

/// Compute the full score breakdown for a single record.
///
/// `query_lower` must already be lowercased.
#[must_use]
pub fn compute_breakdown(
    record: &MemoryRecord,
    query_lower: &str,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    ScoreBreakdown {
        content: content_score(record, query_lower),
        tags: tag_score(record, query_lower),
        importance: importance_score(record),
        recency: recency_score(record, now),
    }
}

fn content_score(record: &MemoryRecord, query_lower: &str) -> f64 {
    if record.content.to_lowercase().contains(query_lower) {
        CONTENT_MATCH_SCORE
    } else {
        0.0
    }
}

fn tag_score(record: &MemoryRecord, query_lower: &str) -> f64 {
    let hits = record
        .tags
        .iter()
        .filter(|tag| tag.to_lowercase().contains(query_lower))
        .count();
    TAG_MATCH_SCORE * hits as f64
}

fn importance_score(record: &MemoryRecord) -> f64 {
    IMPORTANCE_FACTOR * record.importance
}

/// Linear recency bonus: 20 points at creation, 0 after twenty days.
fn recency_score(record: &MemoryRecord, now: DateTime<Utc>) -> f64 {
    (RECENCY_WINDOW_DAYS - days_between(record.created_at, now)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCategory;
    use chrono::Duration;

    fn record(
        content: &str,
        tags: &[&str],
        importance: f64,
        created_at: DateTime<Utc>,
    ) -> MemoryRecord {
        MemoryRecord::new(
            content,
            MemoryCategory::Episodic,
            importance,
            0.0,
            tags.iter().copied(),
            created_at,
        )
    }

    #[test]
    fn verbatim_hit_scores_one_hundred() {
        let now = Utc::now();
        let r = record("We talked about the Lighthouse", &[], 0.0, now - Duration::days(30));
        let b = compute_breakdown(&r, "lighthouse", now);
        assert!((b.content - 100.0).abs() < f64::EPSILON);
        assert!((b.total() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn each_matching_tag_adds_fifty() {
        let now = Utc::now();
        let r = record("nothing", &["sea", "seashell", "forest"], 0.0, now - Duration::days(40));
        let b = compute_breakdown(&r, "sea", now);
        assert!((b.tags - 100.0).abs() < f64::EPSILON);
        assert!(b.content.abs() < f64::EPSILON);
    }

    #[test]
    fn recency_decays_linearly_to_zero() {
        let now = Utc::now();
        let fresh = record("x", &[], 0.0, now);
        let ten_days = record("x", &[], 0.0, now - Duration::days(10));
        let old = record("x", &[], 0.0, now - Duration::days(25));

        assert!((recency_score(&fresh, now) - 20.0).abs() < 1e-6);
        assert!((recency_score(&ten_days, now) - 10.0).abs() < 1e-6);
        assert!(recency_score(&old, now).abs() < f64::EPSILON);
    }

    #[test]
    fn importance_contributes_half() {
        let now = Utc::now();
        let r = record("x", &[], 80.0, now - Duration::days(30));
        assert!((compute_breakdown(&r, "zzz", now).importance - 40.0).abs() < f64::EPSILON);
    }
}
