//! Chat service orchestrating the session store and response engine.
//!
//! One inbound message flows: record user message -> extract display
//! name into context -> read bounded recent history -> engine.respond
//! (no store guard held across the external await) -> personalize ->
//! record bot message. Internal faults are converted here, once, into a
//! degraded apologetic reply so a single message's failure never escapes
//! to the transport layer or leaves the store half-updated.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};
use uuid::Uuid;

use confab_types::chat::{Message, Reply, ReplySource, Sender};
use confab_types::error::StoreError;

use crate::engine::generate::Generator;
use crate::engine::responder::ResponseEngine;
use crate::session::store::SessionStore;

/// How many recent messages are passed to the engine as context.
const HISTORY_WINDOW: usize = 4;

/// Context key holding the user's extracted display name.
const USER_NAME_KEY: &str = "user_name";

/// Greeting token replaced during personalization.
const GREETING_TOKEN: &str = "Hello!";

/// Best-effort reply when message processing itself fails.
const DEGRADED_REPLY: &str =
    "I'm sorry, I ran into a problem handling that. Please try again in a moment.";

/// Matches "my name is X", "I'm X", "I am X", "call me X" and captures a
/// single alphabetic word. No validation that the token is a plausible name.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:my name is|i'm|i am|call me)\s+([a-zA-Z]+)")
        .expect("name pattern is a valid regex")
});

/// Orchestrates conversations over a session store and response engine.
///
/// Generic over the [`SessionStore`] and [`Generator`] ports so the store
/// can be swapped in tests (confab-core never depends on confab-infra).
pub struct ChatService<S, G> {
    store: S,
    engine: ResponseEngine<G>,
}

impl<S: SessionStore, G: Generator> ChatService<S, G> {
    pub fn new(store: S, engine: ResponseEngine<G>) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a session under a fresh server-generated identifier.
    pub async fn new_session(&self) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        self.store.create_session(&id).await?;
        debug!(session_id = %id, "session created");
        Ok(id)
    }

    /// Process one user message and return the reply.
    ///
    /// Auto-creates the session when unknown. Never fails: any internal
    /// fault is converted into a fixed apologetic reply with confidence
    /// 0.0 and source `error`.
    pub async fn post_message(&self, session_id: &str, content: &str) -> Reply {
        match self.process_message(session_id, content).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(session_id, error = %err, "message processing failed");
                Reply {
                    message: DEGRADED_REPLY.to_string(),
                    confidence: 0.0,
                    suggestions: Vec::new(),
                    source: ReplySource::Error,
                }
            }
        }
    }

    async fn process_message(&self, session_id: &str, content: &str) -> Result<Reply, StoreError> {
        self.store
            .add_message(session_id, content, Sender::User)
            .await?;

        if let Some(name) = extract_name(content) {
            debug!(session_id, name, "extracted user name");
            self.store
                .set_context(session_id, USER_NAME_KEY, &name)
                .await?;
        }

        // History is read before the potentially slow external call and
        // the bot message appended after it; no store access in between.
        let history = self
            .store
            .recent_messages(session_id, HISTORY_WINDOW)
            .await?;
        let mut reply = self.engine.respond(content, &history).await;

        if let Some(name) = self.store.context_value(session_id, USER_NAME_KEY).await? {
            reply.message = personalize(&reply.message, &name);
        }

        self.store
            .add_message(session_id, &reply.message, Sender::Bot)
            .await?;

        Ok(reply)
    }

    /// The full message history, or `StoreError::NotFound` for an
    /// unknown session.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>, StoreError> {
        if self.store.get_session(session_id).await?.is_none() {
            return Err(StoreError::NotFound);
        }
        self.store.messages(session_id).await
    }

    /// Delete a session and all dependent data; `Ok(false)` when unknown.
    pub async fn delete_session(&self, session_id: &str) -> Result<bool, StoreError> {
        self.store.delete_session(session_id).await
    }

    /// Snapshot count of live sessions.
    pub async fn session_count(&self) -> Result<usize, StoreError> {
        self.store.session_count().await
    }
}

/// Extract and capitalize a display name from raw user input.
fn extract_name(text: &str) -> Option<String> {
    let captures = NAME_PATTERN.captures(text)?;
    let word = captures.get(1)?.as_str();
    let mut chars = word.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase())
}

/// Single, first-occurrence greeting substitution; not general templating.
fn personalize(message: &str, name: &str) -> String {
    if message.contains(GREETING_TOKEN) {
        message.replacen(GREETING_TOKEN, &format!("Hello {name}!"), 1)
    } else {
        message.to_string()
    }
}
