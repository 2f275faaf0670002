use super::types::{ScoredCategory, Severity, SymptomCategory};

/// Primary matches are the first entries of the sorted, filtered list.
pub const PRIMARY_LIMIT: usize = 3;

/// Score one category against the context vocabulary: +1 for every
/// (word, keyword) pair where either contains the other as a substring.
/// The bidirectional test is one boolean condition, so a pair contributes
/// at most once. Deliberately permissive to catch partial and plural forms;
/// short keywords over-match, and that is part of the observable contract.
pub fn score_category(vocabulary: &[&str], category: &SymptomCategory) -> u32 {
    let mut score = 0;
    for word in vocabulary {
        for keyword in &category.keywords {
            if word.contains(keyword.as_str()) || keyword.contains(word) {
                score += 1;
            }
        }
    }
    score
}

/// Score every category, drop non-matches, and sort: score descending, then
/// high severity before not-high on equal scores. The tie-break is partial
/// on purpose — it does not order `Medium` against `Low`, so tied non-high
/// categories keep their table order (the sort is stable).
pub fn rank(vocabulary: &[&str], categories: &[SymptomCategory]) -> Vec<ScoredCategory> {
    let mut scored: Vec<ScoredCategory> = categories
        .iter()
        .map(|cat| ScoredCategory {
            match_score: score_category(vocabulary, cat),
            category: cat.clone(),
        })
        .filter(|s| s.match_score > 0)
        .collect();

    scored.sort_by(|a, b| {
        b.match_score.cmp(&a.match_score).then_with(|| {
            let a_high = a.category.severity == Severity::High;
            let b_high = b.category.severity == Severity::High;
            b_high.cmp(&a_high)
        })
    });

    scored
}

/// The top entries used for response composition. An empty slice is the
/// no-match signal the composer special-cases.
pub fn primary_matches(ranked: &[ScoredCategory]) -> &[ScoredCategory] {
    &ranked[..ranked.len().min(PRIMARY_LIMIT)]
}
