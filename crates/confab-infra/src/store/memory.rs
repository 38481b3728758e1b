//! In-memory, process-local session store.
//!
//! One `DashMap` entry owns a session's metadata, message sequence, and
//! context map together. Mutations on a session happen while holding that
//! entry's shard write guard, so an append (push + count increment +
//! last_activity bump) is atomic and readers never observe a torn write.
//! Deleting the entry removes everything at once.
//!
//! No persistence and no expiry: sessions live until explicitly deleted
//! or the process exits.

use std::collections::HashMap;

use chrono::Utc;
use dashmap::DashMap;

use confab_core::session::store::SessionStore;
use confab_types::chat::{Message, Sender, Session};
use confab_types::error::StoreError;

/// A session's full state, kept under a single map entry.
#[derive(Debug)]
struct SessionEntry {
    session: Session,
    messages: Vec<Message>,
    context: HashMap<String, String>,
}

impl SessionEntry {
    fn new(id: &str) -> Self {
        Self {
            session: Session::new(id),
            messages: Vec::new(),
            context: HashMap::new(),
        }
    }
}

/// DashMap-backed [`SessionStore`].
///
/// A single instance is shared across all request handlers; cheap to
/// share behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create_session(&self, id: &str) -> Result<(), StoreError> {
        // Overwrite on purpose: re-creation resets an existing session.
        self.sessions
            .insert(id.to_string(), SessionEntry::new(id));
        Ok(())
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.get(id).map(|entry| entry.session.clone()))
    }

    async fn add_message(
        &self,
        id: &str,
        content: &str,
        sender: Sender,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::new(id));
        entry.messages.push(Message::now(content, sender));
        entry.session.message_count += 1;
        entry.session.last_activity = Utc::now();
        Ok(())
    }

    async fn recent_messages(&self, id: &str, limit: usize) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .sessions
            .get(id)
            .map(|entry| {
                let skip = entry.messages.len().saturating_sub(limit);
                entry.messages[skip..].to_vec()
            })
            .unwrap_or_default())
    }

    async fn messages(&self, id: &str) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .sessions
            .get(id)
            .map(|entry| entry.messages.clone())
            .unwrap_or_default())
    }

    async fn set_context(&self, id: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry::new(id));
        entry.context.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn context(&self, id: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        Ok(self.sessions.get(id).map(|entry| entry.context.clone()))
    }

    async fn context_value(&self, id: &str, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .sessions
            .get(id)
            .and_then(|entry| entry.context.get(key).cloned()))
    }

    async fn delete_session(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.remove(id).is_some())
    }

    async fn session_count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemorySessionStore::new();
        store.create_session("s1").await.unwrap();
        let session = store.get_session("s1").await.unwrap().unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(session.message_count, 0);
        assert!(store.get_session("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recreate_resets_session() {
        let store = MemorySessionStore::new();
        store.add_message("s1", "hi", Sender::User).await.unwrap();
        store.set_context("s1", "user_name", "Alice").await.unwrap();

        store.create_session("s1").await.unwrap();
        let session = store.get_session("s1").await.unwrap().unwrap();
        assert_eq!(session.message_count, 0);
        assert!(store.messages("s1").await.unwrap().is_empty());
        assert_eq!(store.context("s1").await.unwrap().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_add_message_auto_creates() {
        let store = MemorySessionStore::new();
        store.add_message("fresh", "hi", Sender::User).await.unwrap();
        let session = store.get_session("fresh").await.unwrap().unwrap();
        assert_eq!(session.message_count, 1);
        assert_eq!(store.session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_matches_sequence_length() {
        let store = MemorySessionStore::new();
        for i in 0..10 {
            let sender = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            store
                .add_message("s1", &format!("msg {i}"), sender)
                .await
                .unwrap();
        }
        let session = store.get_session("s1").await.unwrap().unwrap();
        let messages = store.messages("s1").await.unwrap();
        assert_eq!(session.message_count as usize, messages.len());
        assert_eq!(messages.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_keep_count_consistent() {
        let store = Arc::new(MemorySessionStore::new());
        let mut handles = Vec::new();
        for task in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                // Half the tasks hit a shared session, half their own.
                let id = if task % 2 == 0 {
                    "shared".to_string()
                } else {
                    format!("own-{task}")
                };
                for i in 0..25 {
                    store
                        .add_message(&id, &format!("t{task} m{i}"), Sender::User)
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let shared = store.get_session("shared").await.unwrap().unwrap();
        assert_eq!(shared.message_count, 100);
        assert_eq!(store.messages("shared").await.unwrap().len(), 100);
        for task in [1, 3, 5, 7] {
            let id = format!("own-{task}");
            let session = store.get_session(&id).await.unwrap().unwrap();
            assert_eq!(session.message_count as usize, store.messages(&id).await.unwrap().len());
            assert_eq!(session.message_count, 25);
        }
        assert_eq!(store.session_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_recent_messages_limit_and_order() {
        let store = MemorySessionStore::new();
        for i in 0..10 {
            store
                .add_message("s1", &format!("msg {i}"), Sender::User)
                .await
                .unwrap();
        }
        let recent = store.recent_messages("s1", 4).await.unwrap();
        assert_eq!(recent.len(), 4);
        let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["msg 6", "msg 7", "msg 8", "msg 9"]);

        // Limit larger than the sequence returns everything, in order.
        let all = store.recent_messages("s1", 100).await.unwrap();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].content, "msg 0");

        // Unknown session yields an empty sequence, not an error.
        assert!(store.recent_messages("nope", 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_context_semantics() {
        let store = MemorySessionStore::new();

        // Whole-map read distinguishes absent session from empty context.
        assert!(store.context("s1").await.unwrap().is_none());
        store.create_session("s1").await.unwrap();
        assert_eq!(store.context("s1").await.unwrap().unwrap().len(), 0);

        // Last write wins, no history.
        store.set_context("s1", "user_name", "Alice").await.unwrap();
        store.set_context("s1", "user_name", "Bob").await.unwrap();
        assert_eq!(
            store.context_value("s1", "user_name").await.unwrap(),
            Some("Bob".to_string())
        );
        assert!(store.context_value("s1", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_everything_together() {
        let store = MemorySessionStore::new();
        store.add_message("s1", "hi", Sender::User).await.unwrap();
        store.set_context("s1", "user_name", "Alice").await.unwrap();

        assert!(store.delete_session("s1").await.unwrap());
        assert!(store.get_session("s1").await.unwrap().is_none());
        assert!(store.recent_messages("s1", 4).await.unwrap().is_empty());
        assert!(store.context("s1").await.unwrap().is_none());
        assert_eq!(store.session_count().await.unwrap(), 0);

        // Second delete reports that nothing existed.
        assert!(!store.delete_session("s1").await.unwrap());
    }
}
