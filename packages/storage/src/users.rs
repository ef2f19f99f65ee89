// ABOUTME: User storage layer using SQLite
// ABOUTME: Registration transactionally seeds one setting row per catalog entry

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_core::User;

use crate::{is_unique_violation, StorageError};

/// Row-ready user input: the credential has already been hashed by the
/// auth layer before it reaches storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub home_address: Option<String>,
    pub destination_address: Option<String>,
}

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<User, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_user(&row)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        debug!("Fetching user by username: {}", username);

        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    /// Create the user and seed one users_settings row per catalog entry,
    /// all inside a single transaction so an interrupted registration never
    /// leaves a user with a partial settings set.
    pub async fn register(&self, input: NewUser) -> Result<User, StorageError> {
        debug!("Registering user: {}", input.username);

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, home_address, destination_address, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.home_address)
        .bind(&input.destination_address)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::DuplicateUsername(input.username.clone())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        let user_id = result.last_insert_rowid();

        sqlx::query(
            r#"
            INSERT INTO users_settings (user_id, setting_id, value)
            SELECT ?, setting_id, default_value FROM settings ORDER BY setting_id
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get(user_id).await
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        home_address: row.try_get("home_address")?,
        destination_address: row.try_get("destination_address")?,
        created_at: row.try_get("created_at")?,
    })
}
