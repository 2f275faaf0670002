use super::types::{Emotion, ScoredCategory};

/// Fixed wording for the composed reply. Calm, preparatory framing: no alarm
/// words, advice always defers to a professional.
pub struct ResponseTemplates;

impl ResponseTemplates {
    pub fn header() -> &'static str {
        "Here is what your symptoms may point to:"
    }

    /// One ranked block: ordinal, category, upper-cased severity, canned
    /// advisory text, related conditions joined by ", ".
    pub fn match_block(ordinal: usize, scored: &ScoredCategory) -> String {
        let cat = &scored.category;
        format!(
            "{}. {} (severity: {})\n{}\nRelated conditions: {}",
            ordinal,
            cat.category,
            cat.severity.as_str().to_uppercase(),
            cat.response,
            cat.related_conditions.join(", "),
        )
    }

    pub fn closing() -> &'static str {
        "Please check in with a healthcare professional if your symptoms persist or worsen."
    }

    /// Appended after the closing sentence only when the turn was flagged
    /// as concerned.
    pub fn reassurance() -> &'static str {
        "It is understandable to feel uneasy. These notes are a starting point, \
         and a clinician can give you proper guidance."
    }

    /// Returned verbatim when no category matched.
    pub fn clarification() -> &'static str {
        "I could not match that to anything I know about. Could you rephrase \
         or add a bit more detail? For example: \"I have a sore throat and a cough.\""
    }
}

/// Render the reply for one turn. An empty `primary` slice is the no-match
/// signal and yields the fixed clarification request instead of a ranking.
pub fn compose(primary: &[ScoredCategory], emotion: Emotion) -> String {
    if primary.is_empty() {
        return ResponseTemplates::clarification().to_string();
    }

    let blocks: Vec<String> = primary
        .iter()
        .enumerate()
        .map(|(i, scored)| ResponseTemplates::match_block(i + 1, scored))
        .collect();

    let mut message = format!(
        "{}\n\n{}\n\n{}",
        ResponseTemplates::header(),
        blocks.join("\n\n"),
        ResponseTemplates::closing(),
    );

    if emotion == Emotion::Concerned {
        message.push(' ');
        message.push_str(ResponseTemplates::reassurance());
    }

    message
}
