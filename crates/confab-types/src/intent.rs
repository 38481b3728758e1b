//! Intent catalog types for Confab.
//!
//! An [`Intent`] is a named category of user request recognized via
//! phrase matching: trigger patterns plus candidate response templates
//! and intent-specific follow-up prompts. The [`IntentCatalog`] is loaded
//! once at startup and never mutated at runtime.

use serde::{Deserialize, Serialize};

/// A named category of user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    /// Trigger phrases, matched as contiguous substrings of the
    /// lowercased user text.
    pub patterns: Vec<String>,
    /// Candidate response templates; one is selected uniformly at random.
    pub responses: Vec<String>,
    /// Follow-up prompts shown when this intent matched (2-3 entries).
    #[serde(default)]
    pub followups: Vec<String>,
}

/// The process-wide, immutable intent definition table.
///
/// Intents are held in a `Vec` so iteration order -- and therefore
/// classification tie-breaking -- is fixed by insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCatalog {
    #[serde(default)]
    pub intents: Vec<Intent>,
    /// Global pool sampled for suggestions when no intent-specific
    /// follow-ups apply (external and fallback paths).
    #[serde(default)]
    pub suggestion_pool: Vec<String>,
    /// Generic responses used when no intent matches.
    #[serde(default)]
    pub fallback_responses: Vec<String>,
}

impl Default for IntentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IntentCatalog {
    /// The built-in LogiQ Gen assistant catalog.
    pub fn builtin() -> Self {
        let intents = vec![
            Intent {
                name: "greeting".into(),
                patterns: strings(&[
                    "hello",
                    "hi",
                    "hey",
                    "good morning",
                    "good afternoon",
                    "greetings",
                ]),
                responses: strings(&[
                    "Hello! I'm the LogiQ Gen assistant. How can I help you today?",
                    "Hi there! Welcome to LogiQ Gen. What can I do for you?",
                    "Greetings! I'm here to assist you with any questions about LogiQ Gen.",
                ]),
                followups: strings(&[
                    "Tell me about LogiQ Gen",
                    "What services do you offer?",
                    "I need support",
                ]),
            },
            Intent {
                name: "company_info".into(),
                patterns: strings(&[
                    "about logiq gen",
                    "what is logiq gen",
                    "company information",
                    "tell me about the company",
                ]),
                responses: strings(&[
                    "LogiQ Gen is a leading technology company focused on delivering innovative solutions. We specialize in AI, machine learning, and digital transformation services.",
                    "At LogiQ Gen, we're passionate about leveraging cutting-edge technology to solve complex business challenges and drive digital innovation.",
                ]),
                followups: strings(&[
                    "What services do you provide?",
                    "How can I contact you?",
                    "Pricing information",
                ]),
            },
            Intent {
                name: "services".into(),
                patterns: strings(&[
                    "services",
                    "what services",
                    "offerings",
                    "products",
                    "solutions",
                ]),
                responses: strings(&[
                    "LogiQ Gen offers AI development, machine learning solutions, data analytics, cloud services, and digital transformation consulting.",
                    "Our key services include custom software development, AI/ML implementation, cloud migration, and digital strategy consulting.",
                ]),
                followups: strings(&[
                    "How much does it cost?",
                    "Can I get a quote?",
                    "Contact sales team",
                ]),
            },
            Intent {
                name: "support".into(),
                patterns: strings(&["help", "support", "assistance", "problem", "contact"]),
                responses: strings(&[
                    "I'm here to help! Can you please describe the specific issue or question you have?",
                    "Our support team is ready to assist you. What kind of help do you need today?",
                ]),
                followups: strings(&["Technical support", "Sales inquiry", "General questions"]),
            },
            Intent {
                name: "pricing".into(),
                patterns: strings(&["pricing", "cost", "price", "how much", "rates", "quote"]),
                responses: strings(&[
                    "Our pricing varies based on project scope and requirements. I'd be happy to connect you with our sales team for a detailed quote.",
                    "For pricing information, please contact our sales team at sales@logiqgen.com for a customized quote.",
                ]),
                followups: strings(&["Contact sales team", "Service details", "Custom quote"]),
            },
            Intent {
                name: "goodbye".into(),
                patterns: strings(&["bye", "goodbye", "see you later", "farewell"]),
                responses: strings(&[
                    "Thank you for chatting with LogiQ Gen! Have a great day!",
                    "Goodbye! Feel free to reach out anytime you need assistance.",
                ]),
                followups: strings(&["Tell me about LogiQ Gen", "What services do you offer?"]),
            },
        ];

        Self {
            intents,
            suggestion_pool: strings(&[
                "Tell me about LogiQ Gen",
                "What services do you offer?",
                "I need support",
                "Pricing information",
                "How can I contact you?",
                "Can I get a quote?",
            ]),
            fallback_responses: strings(&[
                "I'm not sure I understand that completely. Could you please rephrase your question?",
                "That's an interesting question! Could you provide a bit more detail so I can help you better?",
                "I'd be happy to help! Can you tell me more about what you're looking for?",
            ]),
        }
    }

    /// Look up an intent by name.
    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
