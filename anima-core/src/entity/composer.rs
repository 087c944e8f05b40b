//! Response composition — turning mood, style and memories into text.
//!
//! [`TemplateComposer`] is the rule-based path: always available, fully
//! deterministic, no model behind it. Hosts wanting richer text implement
//! [`ResponseComposer`] themselves.

use crate::entity::classifier::EmotionalImpact;
use crate::memory::record::MemoryRecord;
use crate::mood::Mood;
use crate::personality::{Formality, PersonalityVector, ResponseStyle, Tone, Verbosity};
use crate::types::Polarity;

/// Longest memory excerpt quoted back to the participant, in characters.
const EXCERPT_CHARS: usize = 60;

/// Everything a composer may draw on for one response.
#[derive(Debug, Clone, Copy)]
pub struct CompositionRequest<'a> {
    /// The participant's input.
    pub input: &'a str,
    /// The participant's display name.
    pub participant_name: &'a str,
    /// The entity's own name.
    pub entity_name: &'a str,
    /// Mood after the input was taken in.
    pub mood: Mood,
    /// How the input was classified.
    pub impact: &'a EmotionalImpact,
    /// Style derived from personality and mood.
    pub style: &'a ResponseStyle,
    /// Current personality.
    pub traits: &'a PersonalityVector,
    /// The entity's configured empathy (0–100).
    pub empathy_level: f64,
    /// Relevant earlier memories, best first. Never includes the input itself.
    pub memories: &'a [&'a MemoryRecord],
}

/// Produces the entity's reply.
pub trait ResponseComposer: Send + Sync {
    /// Compose a reply for `request`.
    fn compose(&self, request: &CompositionRequest<'_>) -> String;
}

/// Rule-based composer.
///
/// The reply is assembled from up to five parts, in order: an opening
/// matched to formality, an empathic acknowledgement when the input
/// carried feeling, a mood line, a memory callback, and a closing that
/// depends on verbosity and whether a question was asked. Concise styles
/// keep only the opening and the single most relevant part.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateComposer;

impl ResponseComposer for TemplateComposer {
    fn compose(&self, req: &CompositionRequest<'_>) -> String {
        let mut parts: Vec<String> = vec![opening(req)];

        let acknowledgement = acknowledgement(req);
        let memory_line = req.memories.first().map(|m| memory_callback(m, req.style));

        if req.style.verbosity == Verbosity::Concise {
            if let Some(line) = acknowledgement.or(memory_line) {
                parts.push(line);
            } else if req.input.contains('?') {
                parts.push(question_line(req));
            }
            return parts.join(" ");
        }

        parts.extend(acknowledgement);
        parts.push(mood_line(req.style.tone).to_string());
        parts.extend(memory_line);
        if req.input.contains('?') {
            parts.push(question_line(req));
        }
        if req.style.verbosity == Verbosity::Verbose {
            parts.push(closing(req));
        }
        parts.join(" ")
    }
}

fn opening(req: &CompositionRequest<'_>) -> String {
    let name = req.participant_name;
    match (req.style.formality, req.style.tone) {
        (Formality::Formal, _) => format!("Hello, {name}."),
        (_, Tone::Curt | Tone::Guarded) => format!("{name}."),
        (Formality::Casual, Tone::Enthusiastic | Tone::Energetic) => format!("Hey {name}!"),
        (Formality::Casual, _) => format!("Hey {name}."),
        (Formality::Neutral, _) => format!("Hi {name}."),
    }
}

/// Acknowledge the participant's feelings when empathy is high enough.
fn acknowledgement(req: &CompositionRequest<'_>) -> Option<String> {
    let empathy = (f64::from(req.style.empathy) + req.empathy_level) / 2.0;
    if empathy <= 50.0 {
        return None;
    }
    match req.impact.polarity {
        Polarity::Negative if empathy > 75.0 => Some(
            "That sounds really hard, and I'm glad you told me.".to_string(),
        ),
        Polarity::Negative => Some("I'm sorry you're dealing with that.".to_string()),
        Polarity::Positive => Some("That's lovely to hear.".to_string()),
        Polarity::Neutral => None,
    }
}

fn mood_line(tone: Tone) -> &'static str {
    match tone {
        Tone::Enthusiastic => "I'm in a wonderful mood today!",
        Tone::Warm => "It's good to be talking with you.",
        Tone::Neutral => "I'm doing alright.",
        Tone::Subdued => "I've been feeling a little low, to be honest.",
        Tone::Tense => "I'm a bit on edge right now.",
        Tone::Energetic => "I've got so much energy right now!",
        Tone::Relaxed => "I'm feeling calm and settled.",
        Tone::Curt => "I'm not in the best frame of mind.",
        Tone::Inquisitive => "I've been curious about all sorts of things lately.",
        Tone::Thoughtful => "I've been turning a few things over in my mind.",
        Tone::Friendly => "Always nice to have someone to talk to.",
        Tone::Gentle => "Things have been a bit trying, but I'm managing.",
        Tone::Guarded => "I'd rather keep things simple right now.",
    }
}

fn memory_callback(memory: &MemoryRecord, style: &ResponseStyle) -> String {
    let excerpt = excerpt(&memory.content);
    if style.formality == Formality::Formal {
        format!("I recall \"{excerpt}\".")
    } else {
        format!("That reminds me of \"{excerpt}\".")
    }
}

fn question_line(req: &CompositionRequest<'_>) -> String {
    if req.traits.openness > 70.0 {
        "That's a fascinating question, let me think it through.".to_string()
    } else if req.traits.conscientiousness > 70.0 {
        "Let me give that question proper thought before I answer.".to_string()
    } else {
        "Good question.".to_string()
    }
}

fn closing(req: &CompositionRequest<'_>) -> String {
    match req.mood {
        Mood::Curious | Mood::Excited => "Tell me more, I want to hear everything.".to_string(),
        Mood::Melancholic | Mood::Anxious | Mood::Frustrated => {
            "Maybe talking it over will help us both.".to_string()
        }
        _ => format!("What else is on your mind, {}?", req.participant_name),
    }
}

/// First [`EXCERPT_CHARS`] characters of `content`, with an ellipsis when cut.
fn excerpt(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::record::MemoryCategory;
    use chrono::Utc;

    fn style(verbosity: Verbosity, formality: Formality, tone: Tone, empathy: u8) -> ResponseStyle {
        ResponseStyle {
            tone,
            verbosity,
            formality,
            empathy,
            assertiveness: 50,
        }
    }

    fn impact(polarity: Polarity) -> EmotionalImpact {
        EmotionalImpact {
            polarity,
            intensity: 45.0,
            importance: 40.0,
            weight: 0.0,
        }
    }

    fn request<'a>(
        input: &'a str,
        style: &'a ResponseStyle,
        impact: &'a EmotionalImpact,
        traits: &'a PersonalityVector,
        memories: &'a [&'a MemoryRecord],
    ) -> CompositionRequest<'a> {
        CompositionRequest {
            input,
            participant_name: "Sam",
            entity_name: "Ada",
            mood: Mood::Neutral,
            impact,
            style,
            traits,
            empathy_level: 80.0,
            memories,
        }
    }

    #[test]
    fn formal_opening_and_memory_callback() {
        let s = style(Verbosity::Moderate, Formality::Formal, Tone::Neutral, 50);
        let i = impact(Polarity::Neutral);
        let t = PersonalityVector::balanced();
        let memory = MemoryRecord::new(
            "We walked to the lighthouse",
            MemoryCategory::Episodic,
            50.0,
            0.0,
            Vec::<String>::new(),
            Utc::now(),
        );
        let memories = [&memory];
        let text = TemplateComposer.compose(&request("hello", &s, &i, &t, &memories));
        assert!(text.starts_with("Hello, Sam."));
        assert!(text.contains("I recall \"We walked to the lighthouse\"."));
    }

    #[test]
    fn empathic_acknowledgement_for_negative_input() {
        let s = style(Verbosity::Moderate, Formality::Neutral, Tone::Neutral, 80);
        let i = impact(Polarity::Negative);
        let t = PersonalityVector::balanced();
        let text = TemplateComposer.compose(&request("awful day", &s, &i, &t, &[]));
        assert!(text.contains("That sounds really hard"));
    }

    #[test]
    fn low_empathy_skips_acknowledgement() {
        let s = style(Verbosity::Moderate, Formality::Neutral, Tone::Neutral, 10);
        let i = impact(Polarity::Negative);
        let t = PersonalityVector::balanced();
        let mut req = request("awful day", &s, &i, &t, &[]);
        req.empathy_level = 10.0;
        let text = TemplateComposer.compose(&req);
        assert!(!text.contains("sorry"));
        assert!(!text.contains("hard"));
    }

    #[test]
    fn concise_keeps_one_part() {
        let s = style(Verbosity::Concise, Formality::Neutral, Tone::Neutral, 10);
        let i = impact(Polarity::Neutral);
        let t = PersonalityVector::balanced();
        let mut req = request("what time is it?", &s, &i, &t, &[]);
        req.empathy_level = 10.0;
        assert_eq!(TemplateComposer.compose(&req), "Hi Sam. Good question.");
    }

    #[test]
    fn verbose_adds_closing() {
        let s = style(Verbosity::Verbose, Formality::Casual, Tone::Friendly, 50);
        let i = impact(Polarity::Neutral);
        let t = PersonalityVector::balanced();
        let text = TemplateComposer.compose(&request("hey", &s, &i, &t, &[]));
        assert!(text.starts_with("Hey Sam."));
        assert!(text.ends_with("What else is on your mind, Sam?"));
    }

    #[test]
    fn composition_is_deterministic() {
        let s = style(Verbosity::Moderate, Formality::Neutral, Tone::Warm, 60);
        let i = impact(Polarity::Positive);
        let t = PersonalityVector::creative();
        let req = request("is it nice out?", &s, &i, &t, &[]);
        assert_eq!(TemplateComposer.compose(&req), TemplateComposer.compose(&req));
    }

    #[test]
    fn long_memories_are_excerpted() {
        let long = "a".repeat(100);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), EXCERPT_CHARS + 3);
        assert!(e.ends_with("..."));
    }
}
