//! OpenAI-compatible chat completions generator.
//!
//! Works against any endpoint speaking the `/chat/completions` wire
//! shape (OpenAI, Ollama, vLLM, various proxies) via a configurable base
//! URL. Only the non-streaming path is implemented; the response engine
//! needs a single text back, not a token stream.
//!
//! Every failure class -- connect error, timeout, non-2xx status, parse
//! failure, empty choice list -- maps to a [`GenerateError`] variant; the
//! caller treats them all the same way.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use confab_core::engine::generate::Generator;
use confab_types::chat::{Message, Sender};
use confab_types::config::GeneratorConfig;
use confab_types::error::GenerateError;

/// OpenAI-compatible external generator.
///
/// Does NOT derive Debug so the API key inside `SecretString` can never
/// leak through debug formatting of the surrounding state.
pub struct OpenAiCompatGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiCompatGenerator {
    pub fn new(base_url: String, model: String, api_key: SecretString, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    /// Build a generator from config, resolving the API key from the
    /// configured environment variable.
    ///
    /// Returns `None` when the capability should stay disabled: either
    /// `enabled` is false, or the key variable is unset (logged at warn,
    /// since that usually means a deployment mistake).
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let Ok(api_key) = std::env::var(&config.api_key_env) else {
            tracing::warn!(
                var = %config.api_key_env,
                "generator enabled but API key variable is unset; running rule-based only"
            );
            return None;
        };
        Some(Self::new(
            config.base_url.clone(),
            config.model.clone(),
            SecretString::from(api_key),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_body(&self, system: &str, history: &[Message], user_text: &str) -> ChatCompletionBody {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
        for message in history {
            let role = match message.sender {
                Sender::User => "user",
                Sender::Bot => "assistant",
            };
            messages.push(WireMessage {
                role: role.to_string(),
                content: message.content.clone(),
            });
        }
        messages.push(WireMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        ChatCompletionBody {
            model: self.model.clone(),
            messages,
        }
    }
}

impl Generator for OpenAiCompatGenerator {
    async fn generate(
        &self,
        system: &str,
        history: &[Message],
        user_text: &str,
    ) -> Result<String, GenerateError> {
        let body = self.build_body(system, history, user_text);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenerateError::Malformed("no completion text in response".to_string()))
    }
}
