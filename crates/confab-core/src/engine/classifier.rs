//! Phrase-matching intent classifier.
//!
//! Scores every intent in the catalog against the lowercased user text
//! and picks the strictly-highest scorer. Scoring weights multi-word
//! exact phrase matches over scattered single-word hits:
//!
//! - each pattern occurring as a contiguous substring adds
//!   `2 x (word count of the pattern)`;
//! - each individual pattern word appearing anywhere in the text adds 1,
//!   so a matched phrase's words count twice.
//!
//! No stemming or punctuation handling; lowercasing is the only
//! normalization applied.

use confab_types::intent::{Intent, IntentCatalog};

/// Immutable classifier over a fixed intent catalog.
pub struct IntentClassifier {
    catalog: IntentCatalog,
}

impl IntentClassifier {
    /// Build a classifier. Patterns are lowercased once here so matching
    /// against the lowercased input stays a plain substring check.
    pub fn new(mut catalog: IntentCatalog) -> Self {
        for intent in &mut catalog.intents {
            for pattern in &mut intent.patterns {
                *pattern = pattern.to_lowercase();
            }
        }
        Self { catalog }
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Classify `text`, returning the best-scoring intent.
    ///
    /// Deterministic: ties resolve to whichever intent appears first in
    /// catalog insertion order, and a top score of 0 means no match.
    pub fn classify(&self, text: &str) -> Option<&Intent> {
        let text = text.to_lowercase();

        let mut best: Option<&Intent> = None;
        let mut best_score = 0;
        for intent in &self.catalog.intents {
            let score = score_intent(intent, &text);
            if score > best_score {
                best_score = score;
                best = Some(intent);
            }
        }
        best
    }
}

fn score_intent(intent: &Intent, text: &str) -> usize {
    let mut score = 0;
    for pattern in &intent.patterns {
        let words: Vec<&str> = pattern.split_whitespace().collect();
        if text.contains(pattern.as_str()) {
            score += 2 * words.len();
        }
        for word in &words {
            if text.contains(word) {
                score += 1;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(IntentCatalog::builtin())
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = classifier();
        let first = c.classify("Hello there, I need help").map(|i| i.name.clone());
        let second = c.classify("Hello there, I need help").map(|i| i.name.clone());
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let c = classifier();
        assert!(c.classify("xyzzy plugh").is_none());
        assert!(c.classify("").is_none());
    }

    #[test]
    fn test_lowercase_normalization() {
        let c = classifier();
        let intent = c.classify("GOOD MORNING").unwrap();
        assert_eq!(intent.name, "greeting");
    }

    #[test]
    fn test_phrase_match_outweighs_scattered_words() {
        // "tell me about" is a 3-word phrase inside company_info's
        // "tell me about the company" word set; the phrase-level bonus
        // must beat greeting's single "good morning" hit.
        let c = classifier();
        let intent = c.classify("good morning, tell me about logiq gen").unwrap();
        assert_eq!(intent.name, "company_info");
    }

    #[test]
    fn test_single_word_match() {
        let c = classifier();
        let intent = c.classify("what is your pricing").unwrap();
        assert_eq!(intent.name, "pricing");
    }

    #[test]
    fn test_tie_resolves_to_first_in_catalog_order() {
        let catalog: IntentCatalog = {
            let mut c = IntentCatalog::builtin();
            c.intents = vec![
                confab_types::intent::Intent {
                    name: "alpha".into(),
                    patterns: vec!["ping".into()],
                    responses: vec!["alpha response".into()],
                    followups: vec![],
                },
                confab_types::intent::Intent {
                    name: "beta".into(),
                    patterns: vec!["ping".into()],
                    responses: vec!["beta response".into()],
                    followups: vec![],
                },
            ];
            c
        };
        let c = IntentClassifier::new(catalog);
        assert_eq!(c.classify("ping").unwrap().name, "alpha");
    }

    #[test]
    fn test_scoring_weights() {
        let intent = Intent {
            name: "t".into(),
            patterns: vec!["tell me about".into()],
            responses: vec![],
            followups: vec![],
        };
        // Phrase match: 2 * 3 words, plus 3 word-level hits.
        assert_eq!(score_intent(&intent, "please tell me about it"), 9);
        // Scattered words only: no phrase bonus.
        assert_eq!(score_intent(&intent, "tell him about me"), 3);
        assert_eq!(score_intent(&intent, "nothing relevant"), 0);
    }
}
