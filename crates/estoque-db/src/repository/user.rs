//! # User Repository
//!
//! Persisted user accounts (`usuarios` table).
//!
//! Passwords arrive here already hashed; this layer never sees plaintext.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// A row of the `usuarios` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for user account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation` if the username is taken
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: &str,
    ) -> DbResult<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO usuarios (username, password_hash, full_name, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, full_name, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, username),
            other => other,
        })?;

        debug!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Looks a user up by username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, full_name, created_at
            FROM usuarios
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let created = users.create("maria", "hash", "Maria Silva").await.unwrap();
        assert_eq!(created.username, "maria");

        let found = users.find_by_username("maria").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.full_name, "Maria Silva");
        assert_eq!(found.password_hash, "hash");

        assert!(users.find_by_username("joao").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.create("maria", "hash", "Maria").await.unwrap();
        let result = users.create("maria", "other", "Outra Maria").await;

        match result {
            Err(DbError::UniqueViolation { value, .. }) => assert_eq!(value, "maria"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }
}
