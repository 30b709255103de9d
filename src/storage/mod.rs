use anyhow::{Context as _, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous},
    SqlitePool,
};
use std::{path::Path, str::FromStr};
use uuid::Uuid;

/// A single task record. Doubles as the wire shape: the HTTP API serializes
/// it directly, with camelCase timestamp keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Open (creating if missing) the database at `db_path` and run migrations.
    pub async fn new(db_path: &Path) -> Result<Self> {
        if let Some(dir) = db_path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("src/storage/migrations")
            .run(pool)
            .await
            .context("failed to run database migrations")?;
        Ok(())
    }

    /// All tasks, newest first. Ties on `created_at` are broken by id so the
    /// ordering stays deterministic.
    pub async fn list_todos(&self) -> Result<Vec<TaskRow>> {
        Ok(
            sqlx::query_as("SELECT * FROM todos ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    /// Insert a new task with `completed = false` and return the saved row.
    pub async fn create_todo(&self, text: &str) -> Result<TaskRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO todos (id, text, completed, created_at, updated_at)
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(&id)
        .bind(text)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        self.get_todo(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("todo not found after insert"))
    }

    pub async fn get_todo(&self, id: &str) -> Result<Option<TaskRow>> {
        Ok(sqlx::query_as("SELECT * FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Overwrite the completion flag. Returns the updated row, or `None` when
    /// no task has this id.
    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<Option<TaskRow>> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE todos SET completed = ?, updated_at = ? WHERE id = ?")
            .bind(completed)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_todo(id).await
    }

    /// Rewrite the task text, leaving the completion flag untouched.
    pub async fn set_text(&self, id: &str, text: &str) -> Result<Option<TaskRow>> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE todos SET text = ?, updated_at = ? WHERE id = ?")
            .bind(text)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_todo(id).await
    }

    /// Hard-delete a task, returning its prior state, or `None` when absent.
    pub async fn delete_todo(&self, id: &str) -> Result<Option<TaskRow>> {
        let Some(prior) = self.get_todo(id).await? else {
            return Ok(None);
        };
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(prior))
    }
}
