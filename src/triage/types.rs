use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Category severity. The ranker's tie-break only distinguishes `High` from
/// not-high; no full ordering is defined or relied upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

/// Emotional tone detected on the current turn's text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Concerned,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Concerned => "concerned",
        }
    }
}

// ---------------------------------------------------------------------------
// SymptomCategory
// ---------------------------------------------------------------------------

/// One entry of the symptom knowledge base. The table is fixed at
/// initialization and never mutated for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCategory {
    /// Display name, e.g. "Respiratory".
    pub category: String,
    /// Lowercase keywords used for bidirectional substring matching.
    pub keywords: Vec<String>,
    /// Canned advisory text shown when this category matches.
    pub response: String,
    pub severity: Severity,
    /// Condition names for display, joined with ", " in the reply.
    pub related_conditions: Vec<String>,
}

/// A category annotated with its match score for the current turn.
/// Computed fresh each turn and discarded after composition.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCategory {
    pub category: SymptomCategory,
    pub match_score: u32,
}

// ---------------------------------------------------------------------------
// TurnReply
// ---------------------------------------------------------------------------

/// Summary of one primary match, for UI layers that want structure
/// alongside the composed message.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub category: String,
    pub severity: Severity,
    pub score: u32,
}

/// Result of one full turn: the composed advisory message plus what fed it.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReply {
    pub session_id: Uuid,
    pub message: String,
    pub emotion: Emotion,
    pub matches: Vec<MatchSummary>,
    pub processing_time_ms: u64,
}

// ---------------------------------------------------------------------------
// TriageError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Knowledge load failed ({0}): {1}")]
    KnowledgeLoad(String, String),

    #[error("Knowledge parse failed ({0}): {1}")]
    KnowledgeParse(String, String),

    #[error("Knowledge validation failed: {0}")]
    KnowledgeInvalid(String),

    #[error("Internal lock failed")]
    LockFailed,
}

// ---------------------------------------------------------------------------
// TriageEngine trait
// ---------------------------------------------------------------------------

/// The main triage engine seam. One context per session; turns within a
/// session are strictly sequential from the caller's perspective.
pub trait TriageEngine {
    /// Open a new conversation session with an empty context.
    fn start_session(&self) -> Result<Uuid, TriageError>;

    /// Run one full turn: normalize → update context → rank → compose.
    /// Never fails on malformed or empty input; absence of matches is data.
    fn handle_message(&self, session_id: &Uuid, text: &str) -> Result<TurnReply, TriageError>;

    /// Raw lowercased message history for a session (audit trail).
    fn session_history(&self, session_id: &Uuid) -> Result<Vec<String>, TriageError>;

    /// Drop a session and its context. Returns false if it did not exist.
    fn end_session(&self, session_id: &Uuid) -> Result<bool, TriageError>;

    /// Number of currently open sessions.
    fn session_count(&self) -> Result<usize, TriageError>;
}
