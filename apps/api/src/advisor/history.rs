//! Append-only chat history keyed by session id.
//!
//! `SqliteHistoryStore` is the durable store used by both binaries;
//! `InMemoryHistoryStore` backs tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppError;
use crate::models::conversation::{ChatMessageRow, ChatTurn, Role};

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, session_id: &str, role: Role, content: &str) -> Result<(), AppError>;

    /// Appends a human message and the reply to it as one unit: either both
    /// turns are stored or neither is.
    async fn append_exchange(
        &self,
        session_id: &str,
        human: &str,
        assistant: &str,
    ) -> Result<(), AppError>;

    /// All turns for `session_id` in append order; empty for unknown sessions.
    async fn read_all(&self, session_id: &str) -> Result<Vec<ChatTurn>, AppError>;
}

pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Wraps `pool`, creating the `chat_messages` table if it does not exist.
    pub async fn new(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS chat_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_messages_session ON chat_messages (session_id, id)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, session_id: &str, role: Role, content: &str) -> Result<(), AppError> {
        // Append-only: rows are never updated or deleted.
        sqlx::query(
            "INSERT INTO chat_messages (session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(role.as_str())
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!("Appended {role} message to session {session_id}");
        Ok(())
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        human: &str,
        assistant: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for (role, content) in [(Role::Human, human), (Role::Assistant, assistant)] {
            sqlx::query(
                "INSERT INTO chat_messages (session_id, role, content, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(session_id)
            .bind(role.as_str())
            .bind(content)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!("Appended exchange to session {session_id}");
        Ok(())
    }

    async fn read_all(&self, session_id: &str) -> Result<Vec<ChatTurn>, AppError> {
        let rows = sqlx::query_as::<_, ChatMessageRow>(
            "SELECT * FROM chat_messages WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| ChatTurn::try_from(row).map_err(AppError::Internal))
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryHistoryStore {
    sessions: RwLock<HashMap<String, Vec<ChatTurn>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, session_id: &str, role: Role, content: &str) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .entry(session_id.to_string())
            .or_default()
            .push(ChatTurn {
                role,
                content: content.to_string(),
            });
        Ok(())
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        human: &str,
        assistant: &str,
    ) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let turns = sessions.entry(session_id.to_string()).or_default();
        turns.push(ChatTurn::human(human));
        turns.push(ChatTurn::assistant(assistant));
        Ok(())
    }

    async fn read_all(&self, session_id: &str) -> Result<Vec<ChatTurn>, AppError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Flattens turns into the `"{role}: {content}\n"` transcript fed to extraction.
/// The output depends only on the turns, so an unchanged history always
/// yields an identical transcript.
pub fn render_transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}\n", t.role, t.content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sqlite_store_preserves_append_order_per_session() {
        let store = SqliteHistoryStore::new(memory_pool().await).await.unwrap();

        store.append("a", Role::Human, "hello").await.unwrap();
        store.append("b", Role::Human, "other session").await.unwrap();
        store.append("a", Role::Assistant, "hi there").await.unwrap();
        store.append("a", Role::Human, "I like music").await.unwrap();

        let turns = store.read_all("a").await.unwrap();
        assert_eq!(
            turns,
            vec![
                ChatTurn::human("hello"),
                ChatTurn::assistant("hi there"),
                ChatTurn::human("I like music"),
            ]
        );
        assert_eq!(store.read_all("b").await.unwrap().len(), 1);
        assert!(store.read_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("history.db").display()
        );

        {
            let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
            let store = SqliteHistoryStore::new(pool.clone()).await.unwrap();
            store.append("s", Role::Human, "persist me").await.unwrap();
            pool.close().await;
        }

        let pool = SqlitePoolOptions::new().connect(&url).await.unwrap();
        let store = SqliteHistoryStore::new(pool).await.unwrap();
        assert_eq!(
            store.read_all("s").await.unwrap(),
            vec![ChatTurn::human("persist me")]
        );
    }

    /// Makes every assistant insert fail, so an exchange dies on its second row.
    async fn reject_assistant_rows(pool: &SqlitePool) {
        sqlx::query(
            "CREATE TRIGGER reject_assistant BEFORE INSERT ON chat_messages
             WHEN NEW.role = 'assistant'
             BEGIN SELECT RAISE(ABORT, 'assistant rows rejected'); END",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_sqlite_exchange_is_all_or_nothing() {
        let pool = memory_pool().await;
        let store = SqliteHistoryStore::new(pool.clone()).await.unwrap();

        store
            .append_exchange("s", "hello", "hi there")
            .await
            .unwrap();
        assert_eq!(
            store.read_all("s").await.unwrap(),
            vec![ChatTurn::human("hello"), ChatTurn::assistant("hi there")]
        );

        reject_assistant_rows(&pool).await;
        let err = store
            .append_exchange("s", "second", "never stored")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(store.read_all("s").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_in_memory_store_isolates_sessions() {
        let store = InMemoryHistoryStore::new();
        store.append("x", Role::Human, "one").await.unwrap();
        store.append("y", Role::Assistant, "two").await.unwrap();
        assert_eq!(store.read_all("x").await.unwrap(), vec![ChatTurn::human("one")]);
        assert_eq!(
            store.read_all("y").await.unwrap(),
            vec![ChatTurn::assistant("two")]
        );
    }

    #[test]
    fn test_render_transcript_labels_each_turn() {
        let turns = vec![
            ChatTurn::human("I'm lost"),
            ChatTurn::assistant("What do you enjoy?"),
        ];
        assert_eq!(
            render_transcript(&turns),
            "human: I'm lost\nassistant: What do you enjoy?\n"
        );
        assert_eq!(render_transcript(&[]), "");
    }
}
