use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// Running context for one chat session. Grows monotonically: counts are
/// never decremented, pruned, or cleared on a category match. The context
/// lives until the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub started_at: NaiveDateTime,
    /// Append-only audit trail of raw lowercased user messages.
    pub history: Vec<String>,
    /// Cumulative normalized-token counts across the whole session.
    pub word_counts: HashMap<String, u32>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self {
            started_at: chrono::Local::now().naive_local(),
            history: Vec::new(),
            word_counts: HashMap::new(),
        }
    }

    /// Merge one user turn into the context: append the lowercased raw
    /// message to history and increment the count of every normalized token.
    /// Returns the number of tokens merged.
    pub fn update(&mut self, raw_message: &str) -> usize {
        self.history.push(raw_message.to_lowercase());

        let tokens = normalize(raw_message);
        let merged = tokens.len();
        for token in tokens {
            *self.word_counts.entry(token).or_insert(0) += 1;
        }
        merged
    }

    /// The context vocabulary: distinct tokens seen so far. This is what the
    /// ranker consumes.
    pub fn vocabulary(&self) -> Vec<&str> {
        self.word_counts.keys().map(String::as_str).collect()
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}
