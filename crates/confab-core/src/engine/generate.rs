//! Generator trait definition.
//!
//! The external generation capability is a black box from the engine's
//! point of view: `generate(system, history, user_text) -> text`, failing
//! on any error. Implementations live in confab-infra (e.g.,
//! `OpenAiCompatGenerator`). Uses native async fn in traits (RPITIT,
//! Rust 2024 edition).

use confab_types::chat::Message;
use confab_types::error::GenerateError;

/// Trait for external text-generation backends.
///
/// `history` carries the most recent session messages; implementations
/// map `Sender::User` to role "user" and `Sender::Bot` to "assistant".
/// Implementations must bound their own latency -- the engine treats a
/// timeout like any other failure.
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        system: &str,
        history: &[Message],
        user_text: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerateError>> + Send;
}

/// Placeholder generator for the disabled capability.
///
/// Never called at runtime (the `Disabled` variant short-circuits), but
/// gives `GenerateCapability` a concrete type parameter when no real
/// backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGenerator;

impl Generator for NoGenerator {
    async fn generate(
        &self,
        _system: &str,
        _history: &[Message],
        _user_text: &str,
    ) -> Result<String, GenerateError> {
        Err(GenerateError::Disabled)
    }
}

/// Presence of the external generation capability, decided once at startup.
///
/// Modeled as a two-variant enum rather than an `Option` checked ad hoc:
/// "fall back to the rule-based path" is a control-flow branch, not a
/// null check.
pub enum GenerateCapability<G> {
    Enabled(G),
    Disabled,
}

impl<G: Generator> GenerateCapability<G> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, GenerateCapability::Enabled(_))
    }

    /// Delegate to the backend, or fail immediately when disabled.
    pub async fn generate(
        &self,
        system: &str,
        history: &[Message],
        user_text: &str,
    ) -> Result<String, GenerateError> {
        match self {
            GenerateCapability::Enabled(generator) => {
                generator.generate(system, history, user_text).await
            }
            GenerateCapability::Disabled => Err(GenerateError::Disabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_capability_fails_fast() {
        let capability: GenerateCapability<NoGenerator> = GenerateCapability::Disabled;
        assert!(!capability.is_enabled());
        let result = capability.generate("system", &[], "hi").await;
        assert!(matches!(result, Err(GenerateError::Disabled)));
    }

    #[tokio::test]
    async fn test_enabled_capability_delegates() {
        struct Canned;
        impl Generator for Canned {
            async fn generate(
                &self,
                _system: &str,
                _history: &[Message],
                _user_text: &str,
            ) -> Result<String, GenerateError> {
                Ok("canned".to_string())
            }
        }

        let capability = GenerateCapability::Enabled(Canned);
        assert!(capability.is_enabled());
        let text = capability.generate("system", &[], "hi").await.unwrap();
        assert_eq!(text, "canned");
    }
}
