//! Chat session, message, and reply types for Confab.
//!
//! These types model a single conversation: the session record, the
//! append-only message sequence inside it, and the reply envelope the
//! response engine produces for each user message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who authored a message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single conversation's identity and accumulated counters.
///
/// Sessions are created on first reference (explicitly or implicitly by
/// the first message) and live until explicitly deleted. `message_count`
/// always equals the length of the session's message sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier, caller-supplied or server-generated.
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub message_count: u32,
}

impl Session {
    /// Create a fresh session record with both timestamps set to now.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            last_activity: now,
            message_count: 0,
        }
    }
}

/// A single message within a session.
///
/// Messages are append-only and ordered by insertion; they are never
/// mutated or reordered after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a message stamped with the current time.
    pub fn now(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// The external generation capability answered.
    External,
    /// A matched intent's response template was selected.
    RuleBased,
    /// No intent matched; generic fallback text.
    Fallback,
    /// An internal fault was converted into a best-effort apology.
    Error,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::External => write!(f, "external"),
            ReplySource::RuleBased => write!(f, "rule_based"),
            ReplySource::Fallback => write!(f, "fallback"),
            ReplySource::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ReplySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" => Ok(ReplySource::External),
            "rule_based" => Ok(ReplySource::RuleBased),
            "fallback" => Ok(ReplySource::Fallback),
            "error" => Ok(ReplySource::Error),
            other => Err(format!("invalid reply source: '{other}'")),
        }
    }
}

/// The response engine's answer to one user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub message: String,
    /// Confidence in [0.0, 1.0]; fixed per source path.
    pub confidence: f64,
    /// Up to three distinct follow-up prompts.
    pub suggestions: Vec<String>,
    pub source: ReplySource,
}
