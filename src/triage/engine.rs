use std::time::Instant;

use uuid::Uuid;

use super::compose::compose;
use super::context::ConversationContext;
use super::knowledge::KnowledgeBase;
use super::normalize::detect_emotion;
use super::ranker::{primary_matches, rank};
use super::store::SessionStore;
use super::types::{Emotion, MatchSummary, TriageEngine, TriageError, TurnReply};

/// Default implementation of the triage engine. Owns the knowledge base and
/// the per-session context store; each turn is a pure, synchronous pass over
/// the session's accumulated context.
pub struct DefaultTriageEngine {
    store: SessionStore,
    knowledge: KnowledgeBase,
}

impl DefaultTriageEngine {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            store: SessionStore::new(),
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// One turn against a caller-owned context, without the session store.
    /// normalize → context merge → rank → compose.
    pub fn run_turn(
        knowledge: &KnowledgeBase,
        context: &mut ConversationContext,
        text: &str,
    ) -> (String, Emotion, Vec<MatchSummary>) {
        let emotion = detect_emotion(text);
        context.update(text);

        let vocabulary = context.vocabulary();
        let ranked = rank(&vocabulary, knowledge.categories());
        let primary = primary_matches(&ranked);

        let matches = primary
            .iter()
            .map(|s| MatchSummary {
                category: s.category.category.clone(),
                severity: s.category.severity,
                score: s.match_score,
            })
            .collect();

        (compose(primary, emotion), emotion, matches)
    }
}

impl TriageEngine for DefaultTriageEngine {
    fn start_session(&self) -> Result<Uuid, TriageError> {
        let session_id = self.store.create()?;
        tracing::info!(session_id = %session_id, "Triage session started");
        Ok(session_id)
    }

    fn handle_message(&self, session_id: &Uuid, text: &str) -> Result<TurnReply, TriageError> {
        let start = Instant::now();

        let (message, emotion, matches) = self.store.with_context_mut(session_id, |context| {
            Self::run_turn(&self.knowledge, context, text)
        })?;

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            session_id = %session_id,
            emotion = emotion.as_str(),
            matches = matches.len(),
            processing_ms = processing_time_ms,
            "Turn complete"
        );

        Ok(TurnReply {
            session_id: *session_id,
            message,
            emotion,
            matches,
            processing_time_ms,
        })
    }

    fn session_history(&self, session_id: &Uuid) -> Result<Vec<String>, TriageError> {
        self.store.history(session_id)
    }

    fn end_session(&self, session_id: &Uuid) -> Result<bool, TriageError> {
        let removed = self.store.remove(session_id)?;
        if removed {
            tracing::info!(session_id = %session_id, "Triage session ended");
        }
        Ok(removed)
    }

    fn session_count(&self) -> Result<usize, TriageError> {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::compose::ResponseTemplates;

    fn engine() -> DefaultTriageEngine {
        DefaultTriageEngine::new(KnowledgeBase::builtin())
    }

    #[test]
    fn session_lifecycle() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        assert_eq!(engine.session_count().unwrap(), 1);
        assert!(engine.end_session(&id).unwrap());
        assert!(!engine.end_session(&id).unwrap());
        assert_eq!(engine.session_count().unwrap(), 0);
    }

    #[test]
    fn unknown_session_rejected() {
        let engine = engine();
        let err = engine.handle_message(&Uuid::new_v4(), "cough").unwrap_err();
        assert!(matches!(err, TriageError::SessionNotFound(_)));
    }

    /// Two-turn scenario: context accumulates across turns and the second
    /// reply ranks Respiratory first.
    #[test]
    fn two_turn_accumulation_ranks_respiratory() {
        let engine = engine();
        let id = engine.start_session().unwrap();

        engine
            .handle_message(&id, "I have a sore throat and a cough")
            .unwrap();
        let reply = engine
            .handle_message(&id, "also feeling very tired")
            .unwrap();

        assert_eq!(reply.matches[0].category, "Respiratory");
        assert!(reply.message.contains("1. Respiratory"));

        // Both turns' tokens are in the history and the context
        let history = engine.session_history(&id).unwrap();
        assert_eq!(
            history,
            vec!["i have a sore throat and a cough", "also feeling very tired"]
        );
    }

    #[test]
    fn no_match_returns_clarification() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        let reply = engine.handle_message(&id, "xyz123").unwrap();
        assert!(reply.matches.is_empty());
        assert_eq!(reply.message, ResponseTemplates::clarification());
    }

    /// Empty and punctuation-only input is handled, never an error.
    #[test]
    fn malformed_input_never_errors() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        for text in ["", "   ", "!?!;,."] {
            let reply = engine.handle_message(&id, text).unwrap();
            assert_eq!(reply.message, ResponseTemplates::clarification());
        }
    }

    #[test]
    fn emotion_gates_reassurance() {
        let engine = engine();
        let id = engine.start_session().unwrap();

        let neutral = engine.handle_message(&id, "I have a cough").unwrap();
        assert_eq!(neutral.emotion, Emotion::Neutral);
        assert!(!neutral.message.contains(ResponseTemplates::reassurance()));

        let concerned = engine
            .handle_message(&id, "I'm scared about this cough")
            .unwrap();
        assert_eq!(concerned.emotion, Emotion::Concerned);
        assert!(concerned.message.ends_with(ResponseTemplates::reassurance()));
        // The cough still matched and ranked
        assert_eq!(concerned.matches[0].category, "Respiratory");
    }

    /// Emotion is re-detected per turn, not carried in the context.
    #[test]
    fn emotion_does_not_persist_across_turns() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        engine.handle_message(&id, "I'm worried about my chest").unwrap();
        let next = engine.handle_message(&id, "the pressure is there again").unwrap();
        assert_eq!(next.emotion, Emotion::Neutral);
    }

    #[test]
    fn primary_matches_capped_at_three() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        let reply = engine
            .handle_message(
                &id,
                "cough, chest pressure, headache, stomach nausea, joint pain",
            )
            .unwrap();
        assert!(reply.matches.len() <= 3);
        assert!(!reply.message.contains("4."));
    }

    #[test]
    fn run_turn_with_caller_owned_context() {
        let kb = KnowledgeBase::builtin();
        let mut context = ConversationContext::new();
        let (message, emotion, matches) =
            DefaultTriageEngine::run_turn(&kb, &mut context, "a sore throat");
        assert_eq!(emotion, Emotion::Neutral);
        assert!(!matches.is_empty());
        assert!(message.starts_with(ResponseTemplates::header()));
        assert_eq!(context.history.len(), 1);
    }

    #[test]
    fn processing_time_recorded() {
        let engine = engine();
        let id = engine.start_session().unwrap();
        let reply = engine.handle_message(&id, "cough").unwrap();
        assert!(reply.processing_time_ms < 1000);
    }
}
