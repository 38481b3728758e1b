//! Response selection engine.
//!
//! Stateless over session data: the caller fetches recent history and
//! passes it in, so no store lock is ever held across the external
//! generation await. Selection order is external capability (when
//! enabled), then matched intent, then generic fallback -- each path
//! tagged with its own source and fixed confidence.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use confab_types::chat::{Message, Reply, ReplySource};
use confab_types::intent::IntentCatalog;

use crate::engine::classifier::IntentClassifier;
use crate::engine::generate::{GenerateCapability, Generator};

/// System preamble sent to the external generator.
const SYSTEM_PREAMBLE: &str = "You are the LogiQ Gen assistant, a concise and friendly \
     helper for questions about LogiQ Gen's services, pricing, and support. \
     Answer in a short paragraph.";

/// Used if a catalog entry has an empty response list.
const EMPTY_CATALOG_REPLY: &str =
    "I'd be happy to help! Can you tell me more about what you're looking for?";

/// Maximum number of suggestions attached to any reply.
const MAX_SUGGESTIONS: usize = 3;

const EXTERNAL_CONFIDENCE: f64 = 0.9;
const RULE_BASED_CONFIDENCE: f64 = 0.8;
const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Classification plus response/suggestion selection.
///
/// Randomness is injected as a seedable [`StdRng`] so template and
/// suggestion choices are reproducible in tests.
pub struct ResponseEngine<G> {
    classifier: IntentClassifier,
    capability: GenerateCapability<G>,
    rng: Mutex<StdRng>,
}

impl<G: Generator> ResponseEngine<G> {
    pub fn new(catalog: IntentCatalog, capability: GenerateCapability<G>, rng: StdRng) -> Self {
        Self {
            classifier: IntentClassifier::new(catalog),
            capability,
            rng: Mutex::new(rng),
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Produce a reply for one user message.
    ///
    /// `history` is the caller's bounded window of recent messages,
    /// forwarded to the external generator when that path is taken.
    /// External failure of any kind is swallowed here and the rule-based
    /// path takes over; it never reaches the caller.
    pub async fn respond(&self, text: &str, history: &[Message]) -> Reply {
        if self.capability.is_enabled() {
            match self.capability.generate(SYSTEM_PREAMBLE, history, text).await {
                Ok(message) => {
                    return Reply {
                        message,
                        confidence: EXTERNAL_CONFIDENCE,
                        suggestions: self.pool_suggestions(),
                        source: ReplySource::External,
                    };
                }
                Err(err) => {
                    tracing::debug!(error = %err, "external generation failed, using rule-based path");
                }
            }
        }

        match self.classifier.classify(text) {
            Some(intent) => {
                let message = self.choose(&intent.responses);
                let suggestions = intent
                    .followups
                    .iter()
                    .take(MAX_SUGGESTIONS)
                    .cloned()
                    .collect();
                Reply {
                    message,
                    confidence: RULE_BASED_CONFIDENCE,
                    suggestions,
                    source: ReplySource::RuleBased,
                }
            }
            None => Reply {
                message: self.choose(&self.classifier.catalog().fallback_responses),
                confidence: FALLBACK_CONFIDENCE,
                suggestions: self.pool_suggestions(),
                source: ReplySource::Fallback,
            },
        }
    }

    /// Uniform-random pick from a template list.
    fn choose(&self, templates: &[String]) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        templates
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| EMPTY_CATALOG_REPLY.to_string())
    }

    /// Up to three distinct samples from the global suggestion pool.
    fn pool_suggestions(&self) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.classifier
            .catalog()
            .suggestion_pool
            .choose_multiple(&mut *rng, MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::chat::Sender;
    use confab_types::error::GenerateError;
    use crate::engine::generate::NoGenerator;
    use rand::SeedableRng;

    struct CannedGenerator(&'static str);

    impl Generator for CannedGenerator {
        async fn generate(
            &self,
            _system: &str,
            _history: &[Message],
            _user_text: &str,
        ) -> Result<String, GenerateError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    impl Generator for FailingGenerator {
        async fn generate(
            &self,
            _system: &str,
            _history: &[Message],
            _user_text: &str,
        ) -> Result<String, GenerateError> {
            Err(GenerateError::Http("connection refused".to_string()))
        }
    }

    fn engine_without_generator() -> ResponseEngine<NoGenerator> {
        ResponseEngine::new(
            IntentCatalog::builtin(),
            GenerateCapability::Disabled,
            StdRng::seed_from_u64(7),
        )
    }

    #[tokio::test]
    async fn test_rule_based_reply_for_matched_intent() {
        let engine = engine_without_generator();
        let reply = engine.respond("hello there", &[]).await;
        assert_eq!(reply.source, ReplySource::RuleBased);
        assert!((reply.confidence - 0.8).abs() < f64::EPSILON);
        let greeting = engine.classifier().catalog().intent("greeting").unwrap();
        assert!(greeting.responses.contains(&reply.message));
        assert_eq!(reply.suggestions, greeting.followups);
    }

    #[tokio::test]
    async fn test_fallback_reply_when_no_intent_matches() {
        let engine = engine_without_generator();
        let reply = engine.respond("xyzzy plugh", &[]).await;
        assert_eq!(reply.source, ReplySource::Fallback);
        assert!((reply.confidence - 0.6).abs() < f64::EPSILON);
        assert!(engine
            .classifier()
            .catalog()
            .fallback_responses
            .contains(&reply.message));
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_external_success_returns_verbatim_text() {
        let engine = ResponseEngine::new(
            IntentCatalog::builtin(),
            GenerateCapability::Enabled(CannedGenerator("Generated answer.")),
            StdRng::seed_from_u64(7),
        );
        let history = vec![Message::now("hi", Sender::User)];
        let reply = engine.respond("tell me about logiq gen", &history).await;
        assert_eq!(reply.message, "Generated answer.");
        assert_eq!(reply.source, ReplySource::External);
        assert!((reply.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_external_failure_never_propagates() {
        let engine = ResponseEngine::new(
            IntentCatalog::builtin(),
            GenerateCapability::Enabled(FailingGenerator),
            StdRng::seed_from_u64(7),
        );
        let reply = engine.respond("hello", &[]).await;
        // Failure is swallowed; the rule-based path answers instead.
        assert_eq!(reply.source, ReplySource::RuleBased);
        assert!((reply.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_suggestions_are_distinct_and_capped() {
        let engine = engine_without_generator();
        for text in ["hello", "xyzzy plugh", "pricing please", "blorp"] {
            let reply = engine.respond(text, &[]).await;
            assert!(reply.suggestions.len() <= 3, "too many suggestions");
            let mut seen = reply.suggestions.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), reply.suggestions.len(), "duplicate suggestion");
        }
    }

    #[tokio::test]
    async fn test_seeded_rng_is_reproducible() {
        let make = || {
            ResponseEngine::<NoGenerator>::new(
                IntentCatalog::builtin(),
                GenerateCapability::Disabled,
                StdRng::seed_from_u64(42),
            )
        };
        let a = make();
        let b = make();
        for text in ["hello", "xyzzy plugh", "goodbye"] {
            let ra = a.respond(text, &[]).await;
            let rb = b.respond(text, &[]).await;
            assert_eq!(ra.message, rb.message);
            assert_eq!(ra.suggestions, rb.suggestions);
        }
    }
}
