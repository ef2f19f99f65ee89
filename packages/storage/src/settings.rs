// ABOUTME: Storage operations for the settings catalog and per-user values
// ABOUTME: Dashboard settings resolve by catalog name rather than numeric id

use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_core::{Setting, UserSetting};

use crate::StorageError;

pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full settings catalog, shared across all users.
    pub async fn list_catalog(&self) -> Result<Vec<Setting>, StorageError> {
        let rows = sqlx::query("SELECT * FROM settings ORDER BY setting_id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_setting).collect()
    }

    /// A user's settings in creation order.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserSetting>, StorageError> {
        debug!("Fetching settings for user: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM users_settings WHERE user_id = ? ORDER BY user_setting_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_user_setting).collect()
    }

    pub async fn get_user_setting(
        &self,
        user_setting_id: i64,
    ) -> Result<UserSetting, StorageError> {
        let row = sqlx::query("SELECT * FROM users_settings WHERE user_setting_id = ?")
            .bind(user_setting_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_user_setting(&row)
    }

    /// Resolve a user's value for a catalog entry by name. Absent when the
    /// catalog has no such entry or the user holds no row for it.
    pub async fn value_by_name(
        &self,
        user_id: i64,
        setting_name: &str,
    ) -> Result<Option<String>, StorageError> {
        debug!("Resolving setting '{}' for user: {}", setting_name, user_id);

        let value = sqlx::query_scalar(
            r#"
            SELECT us.value FROM users_settings us
            JOIN settings s ON s.setting_id = us.setting_id
            WHERE us.user_id = ? AND s.setting_name = ?
            "#,
        )
        .bind(user_id)
        .bind(setting_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(value)
    }

    /// Overwrite a user setting's value in place.
    pub async fn update_value(
        &self,
        user_setting_id: i64,
        value: &str,
    ) -> Result<UserSetting, StorageError> {
        debug!("Updating user setting: {}", user_setting_id);

        let result = sqlx::query("UPDATE users_settings SET value = ? WHERE user_setting_id = ?")
            .bind(value)
            .bind(user_setting_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_user_setting(user_setting_id).await
    }
}

fn row_to_setting(row: &sqlx::sqlite::SqliteRow) -> Result<Setting, StorageError> {
    Ok(Setting {
        setting_id: row.try_get("setting_id")?,
        setting_name: row.try_get("setting_name")?,
        default_value: row.try_get("default_value")?,
    })
}

fn row_to_user_setting(row: &sqlx::sqlite::SqliteRow) -> Result<UserSetting, StorageError> {
    Ok(UserSetting {
        user_setting_id: row.try_get("user_setting_id")?,
        user_id: row.try_get("user_id")?,
        setting_id: row.try_get("setting_id")?,
        value: row.try_get("value")?,
    })
}
