// ABOUTME: Session storage and authentication against hashed bearer tokens
// ABOUTME: Issues opaque tokens on login; only the SHA-256 hash is persisted

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_auth::{generate_token, hash_token, verify_token_hash};

use crate::StorageError;

/// An authenticated session row. The token itself is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_id: i64,
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a session for a user and return the plaintext token. This is
    /// the only moment the token exists outside the client.
    pub async fn create(&self, user_id: i64) -> Result<String, StorageError> {
        debug!("Creating session for user: {}", user_id);

        let token = generate_token();
        let token_hash = hash_token(&token);

        sqlx::query(
            "INSERT INTO sessions (user_id, token_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(token)
    }

    /// Resolve a bearer token to its session, if one exists. Bumps
    /// `last_used_at` on success.
    pub async fn authenticate(&self, token: &str) -> Result<Option<Session>, StorageError> {
        let token_hash = hash_token(token);

        let row = sqlx::query("SELECT * FROM sessions WHERE token_hash = ?")
            .bind(&token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let stored_hash: String = row.try_get("token_hash")?;

        // Double-check with constant-time comparison
        if !verify_token_hash(token, &stored_hash) {
            return Ok(None);
        }

        let session = row_to_session(&row)?;

        sqlx::query("UPDATE sessions SET last_used_at = ? WHERE session_id = ?")
            .bind(Utc::now())
            .bind(session.session_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Some(session))
    }

    /// Revoke the session behind a token. Unknown tokens are a no-op so
    /// logout stays idempotent.
    pub async fn revoke(&self, token: &str) -> Result<(), StorageError> {
        debug!("Revoking session");

        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session, StorageError> {
    Ok(Session {
        session_id: row.try_get("session_id")?,
        user_id: row.try_get("user_id")?,
        token_hash: row.try_get("token_hash")?,
        created_at: row.try_get("created_at")?,
        last_used_at: row.try_get("last_used_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{NewUser, UserStorage};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn setup_test_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str(":memory:")
            .unwrap()
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn register_alice(pool: &SqlitePool) -> i64 {
        UserStorage::new(pool.clone())
            .register(NewUser {
                username: "alice".to_string(),
                password_hash: gameplan_auth::hash_password("pw1").unwrap(),
                home_address: None,
                destination_address: None,
            })
            .await
            .unwrap()
            .user_id
    }

    #[tokio::test]
    async fn issued_token_authenticates_to_its_user() {
        let pool = setup_test_pool().await;
        let storage = SessionStorage::new(pool.clone());
        let alice = register_alice(&pool).await;

        let token = storage.create(alice).await.unwrap();
        let session = storage.authenticate(&token).await.unwrap().unwrap();

        assert_eq!(session.user_id, alice);
        assert_ne!(session.token_hash, token); // stored form is the hash
    }

    #[tokio::test]
    async fn unknown_token_does_not_authenticate() {
        let storage = SessionStorage::new(setup_test_pool().await);

        let session = storage.authenticate("not-a-real-token").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn revoked_token_stops_authenticating() {
        let pool = setup_test_pool().await;
        let storage = SessionStorage::new(pool.clone());
        let alice = register_alice(&pool).await;

        let token = storage.create(alice).await.unwrap();
        storage.revoke(&token).await.unwrap();

        assert!(storage.authenticate(&token).await.unwrap().is_none());

        // Revoking again is a quiet no-op
        storage.revoke(&token).await.unwrap();
    }

    #[tokio::test]
    async fn authenticate_records_last_use() {
        let pool = setup_test_pool().await;
        let storage = SessionStorage::new(pool.clone());
        let alice = register_alice(&pool).await;

        let token = storage.create(alice).await.unwrap();
        let session = storage.authenticate(&token).await.unwrap().unwrap();
        assert!(session.last_used_at.is_none());

        let session = storage.authenticate(&token).await.unwrap().unwrap();
        assert!(session.last_used_at.is_some());
    }
}
