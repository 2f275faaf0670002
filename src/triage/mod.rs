//! Rule-based symptom triage: keyword matching and severity ranking over a
//! fixed category table, with a running per-session word context.
//!
//! Data flow is strictly linear per turn:
//! raw text → normalized tokens → context update → score categories →
//! filter/sort → compose reply. No stage feeds back into an earlier one.

pub mod compose;
pub mod context;
pub mod engine;
pub mod knowledge;
pub mod normalize;
pub mod ranker;
pub mod store;
pub mod types;

pub use engine::DefaultTriageEngine;
pub use knowledge::KnowledgeBase;
pub use types::{
    Emotion, MatchSummary, ScoredCategory, Severity, SymptomCategory, TriageEngine, TriageError,
    TurnReply,
};
