//! Emotional-impact classification of incoming text.
//!
//! The entity never tries to understand language. It only needs a
//! polarity, an intensity and a storage importance for each input, and
//! the [`ImpactClassifier`] trait is the seam where a smarter model can
//! replace the built-in word lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Polarity, Stimulus};

/// Intensity used when no lexicon word matches.
pub const BASE_INTENSITY: f64 = 20.0;

/// Ceiling on lexicon-derived intensity.
pub const MAX_INTENSITY: f64 = 80.0;

/// Emotional reading of one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalImpact {
    /// Overall direction.
    pub polarity: Polarity,
    /// Strength (0–100).
    pub intensity: f64,
    /// Importance to store the input memory with (0–100).
    pub importance: f64,
    /// Emotional weight to store the input memory with (-100–100).
    pub weight: f64,
}

impl EmotionalImpact {
    /// The stimulus this impact feeds into the mood engine.
    #[must_use]
    pub fn stimulus(&self) -> Stimulus {
        Stimulus::new(self.polarity, self.intensity)
    }
}

/// Turns raw input into an [`EmotionalImpact`].
pub trait ImpactClassifier: Send + Sync {
    /// Classify `input`.
    fn classify(&self, input: &str) -> EmotionalImpact;
}

/// Word-list classifier: counts positive and negative words.
///
/// - polarity: the side with more matches; ties are neutral
/// - intensity: `min(80, 30 + 15 × matches)`, or 20 with no matches
/// - importance: `30 + min(50, chars / 2)`
/// - weight: `+intensity`, `−intensity` or 0 by polarity
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

const POSITIVE_WORDS: &[&str] = &[
    "happy", "glad", "great", "good", "love", "wonderful", "thanks", "thank", "excellent",
    "amazing", "nice", "joy", "excited", "beautiful", "fun", "awesome", "kind", "grateful",
    "hope", "enjoy", "proud", "calm", "friend",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "hate", "bad", "terrible", "awful", "upset", "worried", "afraid", "hurt",
    "lonely", "tired", "annoyed", "frustrated", "sorry", "lost", "fear", "pain", "horrible",
    "scared", "stressed", "miserable",
];

impl LexiconClassifier {
    /// Classifier over the built-in word lists.
    #[must_use]
    pub fn new() -> Self {
        Self::with_words(POSITIVE_WORDS.iter().copied(), NEGATIVE_WORDS.iter().copied())
    }

    /// Classifier over custom word lists. Words are matched lowercase.
    #[must_use]
    pub fn with_words<P, N, S>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpactClassifier for LexiconClassifier {
    #[allow(clippy::cast_precision_loss)]
    fn classify(&self, input: &str) -> EmotionalImpact {
        let lower = input.to_lowercase();
        let (mut pos, mut neg) = (0usize, 0usize);
        for word in tokenize(&lower) {
            if self.positive.contains(word) {
                pos += 1;
            } else if self.negative.contains(word) {
                neg += 1;
            }
        }

        let polarity = match pos.cmp(&neg) {
            std::cmp::Ordering::Greater => Polarity::Positive,
            std::cmp::Ordering::Less => Polarity::Negative,
            std::cmp::Ordering::Equal => Polarity::Neutral,
        };
        let matches = pos + neg;
        let intensity = if matches == 0 {
            BASE_INTENSITY
        } else {
            (30.0 + 15.0 * matches as f64).min(MAX_INTENSITY)
        };
        let importance = 30.0 + (input.chars().count() as f64 / 2.0).min(50.0);
        let weight = match polarity {
            Polarity::Positive => intensity,
            Polarity::Negative => -intensity,
            Polarity::Neutral => 0.0,
        };

        EmotionalImpact {
            polarity,
            intensity,
            importance,
            weight,
        }
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
}
