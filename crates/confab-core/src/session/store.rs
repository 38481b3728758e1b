//! SessionStore trait definition.
//!
//! The store owns all per-session state: metadata, the append-only
//! message sequence, and free-form context key/value pairs. Implementations
//! live in confab-infra (e.g., `MemorySessionStore`). Uses native async fn
//! in traits (RPITIT, Rust 2024 edition).

use std::collections::HashMap;

use confab_types::chat::{Message, Sender, Session};
use confab_types::error::StoreError;

/// Port trait for per-session conversation state.
///
/// Mutating operations on one session must be atomic with respect to
/// concurrent callers: a reader never observes a partially-applied
/// message append, and `message_count` always equals the length of the
/// message sequence.
pub trait SessionStore: Send + Sync {
    /// Initialize a session with current timestamps and no messages.
    ///
    /// Idempotent overwrite: calling this on an existing id resets it,
    /// so callers never need to check existence first.
    fn create_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Pure lookup, no side effect. `Ok(None)` when the session is unknown.
    fn get_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Append a message, increment the count, and bump last_activity.
    ///
    /// Auto-creates the session when absent; this is not an error.
    fn add_message(
        &self,
        id: &str,
        content: &str,
        sender: Sender,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// The last `limit` messages in original order.
    ///
    /// Empty when the session is unknown.
    fn recent_messages(
        &self,
        id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// The full message sequence in original order.
    ///
    /// Empty when the session is unknown.
    fn messages(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// Set a context entry, last-write-wins. Auto-creates the session.
    fn set_context(
        &self,
        id: &str,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// The whole context mapping.
    ///
    /// `Ok(None)` when the session itself is unknown; an empty map when
    /// the session exists with no entries.
    fn context(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<HashMap<String, String>>, StoreError>> + Send;

    /// A single context value, `Ok(None)` when session or key is unknown.
    fn context_value(
        &self,
        id: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Remove the session, its messages, and its context together.
    ///
    /// Returns whether a session existed.
    fn delete_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// Snapshot count of live sessions, for diagnostics.
    fn session_count(
        &self,
    ) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}
