use std::path::Path;

use super::types::{Severity, SymptomCategory, TriageError};

/// The symptom category table. Seven entries, fixed at initialization,
/// immutable for the process lifetime. This table is the entire knowledge
/// base of the engine.
#[derive(Debug)]
pub struct KnowledgeBase {
    categories: Vec<SymptomCategory>,
}

impl KnowledgeBase {
    /// The built-in category table: Respiratory, Cardiovascular,
    /// Neurological, Gastrointestinal, Endocrine, Musculoskeletal,
    /// Mental Health. Keyword lists are the compatibility surface of the
    /// ranker; changing them changes observable ranking.
    pub fn builtin() -> Self {
        let categories = vec![
            category(
                "Respiratory",
                &["cough", "throat", "breath", "congestion", "sinus", "wheeze", "chest", "phlegm"],
                "These symptoms often go with an airway or chest infection. \
                 Rest, fluids, and humid air tend to help mild cases.",
                Severity::Medium,
                &["Common cold", "Influenza", "Bronchitis", "Asthma"],
            ),
            category(
                "Cardiovascular",
                &["chest", "heart", "palpitation", "pressure", "dizzy", "pulse"],
                "These symptoms can relate to the heart or circulation. \
                 It is worth having them checked promptly by a clinician.",
                Severity::High,
                &["Hypertension", "Arrhythmia", "Angina"],
            ),
            category(
                "Neurological",
                &["headache", "migraine", "numb", "memory", "vision", "tremor"],
                "These symptoms can involve the nervous system. Keeping note \
                 of when they occur helps a clinician narrow things down.",
                Severity::High,
                &["Migraine", "Tension headache", "Neuropathy"],
            ),
            category(
                "Gastrointestinal",
                &["stomach", "nausea", "vomit", "diarrhea", "bowel"],
                "These symptoms often point to the digestive tract. Small \
                 bland meals and plenty of fluids usually help while it settles.",
                Severity::Medium,
                &["Gastritis", "Food poisoning", "Irritable bowel syndrome"],
            ),
            category(
                "Endocrine",
                &["temperature", "fatigue", "thirst", "hormone", "glucose"],
                "These symptoms can reflect how the body regulates energy and \
                 temperature. A routine blood test is a common first step.",
                Severity::Medium,
                &["Diabetes", "Thyroid disorder", "Anemia"],
            ),
            category(
                "Musculoskeletal",
                &["muscle", "joint", "back", "pain", "knee"],
                "These symptoms usually involve muscles or joints. Gentle \
                 movement, rest, and heat or ice often ease mild cases.",
                Severity::Low,
                &["Arthritis", "Muscle strain", "Sciatica"],
            ),
            category(
                "Mental Health",
                &["anxiety", "stress", "sleep", "mood", "depress", "panic"],
                "These symptoms touch on mental wellbeing. Talking with \
                 someone you trust or a professional can make a real difference.",
                Severity::Medium,
                &["Generalized anxiety", "Depression", "Insomnia"],
            ),
        ];

        debug_assert!(validate(&categories).is_ok());
        Self { categories }
    }

    /// Load a replacement table from a JSON file (same shape as the built-in
    /// entries). Keywords are lowercased on ingest; the table is validated
    /// before use.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TriageError::KnowledgeLoad(path.display().to_string(), e.to_string())
        })?;

        let mut categories: Vec<SymptomCategory> = serde_json::from_str(&json).map_err(|e| {
            TriageError::KnowledgeParse(path.display().to_string(), e.to_string())
        })?;

        for cat in &mut categories {
            for keyword in &mut cat.keywords {
                *keyword = keyword.to_lowercase();
            }
        }

        validate(&categories)?;
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[SymptomCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Table invariants: at least one category, every category named, every
/// keyword list non-empty with no empty keywords.
fn validate(categories: &[SymptomCategory]) -> Result<(), TriageError> {
    if categories.is_empty() {
        return Err(TriageError::KnowledgeInvalid(
            "category table is empty".into(),
        ));
    }

    for cat in categories {
        if cat.category.trim().is_empty() {
            return Err(TriageError::KnowledgeInvalid(
                "category with empty name".into(),
            ));
        }
        if cat.keywords.is_empty() {
            return Err(TriageError::KnowledgeInvalid(format!(
                "category '{}' has no keywords",
                cat.category,
            )));
        }
        if cat.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(TriageError::KnowledgeInvalid(format!(
                "category '{}' has an empty keyword",
                cat.category,
            )));
        }
    }

    Ok(())
}

fn category(
    name: &str,
    keywords: &[&str],
    response: &str,
    severity: Severity,
    related: &[&str],
) -> SymptomCategory {
    SymptomCategory {
        category: name.into(),
        keywords: keywords.iter().map(|k| (*k).into()).collect(),
        response: response.into(),
        severity,
        related_conditions: related.iter().map(|r| (*r).into()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_has_seven_categories_in_order() {
        let kb = KnowledgeBase::builtin();
        let names: Vec<&str> = kb.categories().iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Respiratory",
                "Cardiovascular",
                "Neurological",
                "Gastrointestinal",
                "Endocrine",
                "Musculoskeletal",
                "Mental Health",
            ]
        );
    }

    #[test]
    fn builtin_keywords_nonempty_and_lowercase() {
        let kb = KnowledgeBase::builtin();
        for cat in kb.categories() {
            assert!(!cat.keywords.is_empty(), "{} has no keywords", cat.category);
            for keyword in &cat.keywords {
                assert_eq!(keyword, &keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn builtin_severities_match_table() {
        let kb = KnowledgeBase::builtin();
        let severity_of = |name: &str| {
            kb.categories()
                .iter()
                .find(|c| c.category == name)
                .unwrap()
                .severity
        };
        assert_eq!(severity_of("Cardiovascular"), Severity::High);
        assert_eq!(severity_of("Neurological"), Severity::High);
        assert_eq!(severity_of("Musculoskeletal"), Severity::Low);
        assert_eq!(severity_of("Respiratory"), Severity::Medium);
    }

    /// Canned responses keep calm, preparatory framing.
    #[test]
    fn builtin_responses_never_contain_alarm_words() {
        let alarm_words = ["immediately", "urgently", "emergency", "danger", "warning"];
        let kb = KnowledgeBase::builtin();
        for cat in kb.categories() {
            let lower = cat.response.to_lowercase();
            for word in &alarm_words {
                assert!(
                    !lower.contains(word),
                    "{} response contains alarm word '{}'",
                    cat.category,
                    word,
                );
            }
        }
    }

    #[test]
    fn load_roundtrip_from_json_file() {
        let kb = KnowledgeBase::builtin();
        let json = serde_json::to_string_pretty(kb.categories()).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(loaded.len(), 7);
        assert_eq!(loaded.categories()[0].category, "Respiratory");
    }

    #[test]
    fn load_lowercases_keywords() {
        let json = r#"[{
            "category": "Respiratory",
            "keywords": ["Cough", "THROAT"],
            "response": "Rest and fluids.",
            "severity": "medium",
            "related_conditions": ["Common cold"]
        }]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.categories()[0].keywords, vec!["cough", "throat"]);
    }

    #[test]
    fn load_rejects_empty_keyword_list() {
        let json = r#"[{
            "category": "Respiratory",
            "keywords": [],
            "response": "Rest and fluids.",
            "severity": "medium",
            "related_conditions": []
        }]"#;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = KnowledgeBase::load(file.path()).unwrap_err();
        assert!(matches!(err, TriageError::KnowledgeInvalid(_)));
    }

    #[test]
    fn load_missing_file_is_load_error() {
        let err = KnowledgeBase::load(Path::new("/nonexistent/knowledge.json")).unwrap_err();
        assert!(matches!(err, TriageError::KnowledgeLoad(_, _)));
    }

    #[test]
    fn load_bad_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();

        let err = KnowledgeBase::load(file.path()).unwrap_err();
        assert!(matches!(err, TriageError::KnowledgeParse(_, _)));
    }
}
