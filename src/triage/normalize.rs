use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Emotion;

/// Everything that is not a word character or whitespace is dropped.
static RE_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Fixed synonym table applied per token after punctuation stripping.
/// Maps colloquial forms onto the vocabulary the keyword lists use.
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("fever", "temperature"),
        ("sore", "pain"),
        ("hurt", "pain"),
        ("hurts", "pain"),
        ("vomiting", "vomit"),
        ("nauseated", "nausea"),
        ("tired", "fatigue"),
        ("exhausted", "fatigue"),
        ("anxious", "anxiety"),
        ("breathless", "breath"),
        ("dizziness", "dizzy"),
        ("stressed", "stress"),
        ("sleepless", "sleep"),
    ])
});

/// Words that flag the current turn as emotionally loaded.
const CONCERN_WORDS: &[&str] = &[
    "worried",
    "scared",
    "panic",
    "urgent",
    "bad",
    "worse",
    "emergency",
];

/// Normalize free text into tokens: lowercase, strip punctuation, split on
/// whitespace, remap synonyms. Order is preserved and duplicates are kept —
/// the context accumulator counts occurrences.
pub fn normalize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let stripped = RE_PUNCT.replace_all(&lower, "");
    stripped
        .split_whitespace()
        .map(|token| match SYNONYMS.get(token) {
            Some(mapped) => (*mapped).to_string(),
            None => token.to_string(),
        })
        .collect()
}

/// Flag the current turn as `Concerned` if any normalized token is an exact
/// member of the concern-word set. Checked against the turn's own text only,
/// never against accumulated context.
pub fn detect_emotion(text: &str) -> Emotion {
    let tokens = normalize(text);
    if tokens.iter().any(|t| CONCERN_WORDS.contains(&t.as_str())) {
        Emotion::Concerned
    } else {
        Emotion::Neutral
    }
}
