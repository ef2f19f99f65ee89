// ABOUTME: Task template storage layer using SQLite
// ABOUTME: CRUD for per-user task templates; delete respects gameplan references

use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_core::{Task, TaskCreateInput};

use crate::{is_foreign_key_violation, StorageError};

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>, StorageError> {
        debug!("Fetching tasks for user: {}", user_id);

        let rows = sqlx::query("SELECT * FROM tasks WHERE user_id = ? ORDER BY task_id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_task).collect()
    }

    pub async fn get(&self, task_id: i64) -> Result<Task, StorageError> {
        debug!("Fetching task: {}", task_id);

        let row = sqlx::query("SELECT * FROM tasks WHERE task_id = ?")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;

        row_to_task(&row)
    }

    pub async fn create(&self, user_id: i64, input: TaskCreateInput) -> Result<Task, StorageError> {
        debug!("Creating task '{}' for user: {}", input.task_name, user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, task_name, task_description, duration_estimate)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&input.task_name)
        .bind(&input.task_description)
        .bind(input.duration_estimate)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get(result.last_insert_rowid()).await
    }

    /// Delete a task template. A task still referenced by a gameplan entry
    /// is protected by the foreign key and surfaces as `TaskInGameplan`.
    pub async fn delete(&self, task_id: i64) -> Result<(), StorageError> {
        debug!("Deleting task: {}", task_id);

        let result = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    StorageError::TaskInGameplan
                } else {
                    StorageError::Sqlx(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Result<Task, StorageError> {
    Ok(Task {
        task_id: row.try_get("task_id")?,
        user_id: row.try_get("user_id")?,
        task_name: row.try_get("task_name")?,
        task_description: row.try_get("task_description")?,
        duration_estimate: row.try_get("duration_estimate")?,
        duration_actual: row.try_get("duration_actual")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{NewUser, UserStorage};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
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

    async fn register_user(pool: &SqlitePool, username: &str) -> i64 {
        UserStorage::new(pool.clone())
            .register(NewUser {
                username: username.to_string(),
                password_hash: gameplan_auth::hash_password("pw1").unwrap(),
                home_address: None,
                destination_address: None,
            })
            .await
            .unwrap()
            .user_id
    }

    fn shower() -> TaskCreateInput {
        TaskCreateInput {
            task_name: "Shower".to_string(),
            task_description: None,
            duration_estimate: 10,
        }
    }

    #[tokio::test]
    async fn create_and_list_scopes_to_owner() {
        let pool = setup_test_pool().await;
        let storage = TaskStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;
        let bob = register_user(&pool, "bob").await;

        let task = storage.create(alice, shower()).await.unwrap();
        assert_eq!(task.user_id, alice);
        assert_eq!(task.duration_estimate, 10);
        assert_eq!(task.duration_actual, None);

        assert_eq!(storage.list_for_user(alice).await.unwrap().len(), 1);
        assert!(storage.list_for_user(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_template() {
        let pool = setup_test_pool().await;
        let storage = TaskStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;

        let task = storage.create(alice, shower()).await.unwrap();
        storage.delete(task.task_id).await.unwrap();

        assert!(storage.list_for_user(alice).await.unwrap().is_empty());
        assert!(matches!(
            storage.get(task.task_id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_of_scheduled_task_is_a_gameplan_conflict() {
        let pool = setup_test_pool().await;
        let storage = TaskStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;

        let task = storage.create(alice, shower()).await.unwrap();
        crate::gameplan::GameplanStorage::new(pool.clone())
            .add(
                alice,
                gameplan_core::GameplanTaskCreateInput {
                    task_id: task.task_id,
                    position: 1,
                    start_time: Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap(),
                    end_time: Utc.with_ymd_and_hms(2024, 5, 1, 7, 10, 0).unwrap(),
                },
            )
            .await
            .unwrap();

        let result = storage.delete(task.task_id).await;
        assert!(matches!(result, Err(StorageError::TaskInGameplan)));

        // The task row is untouched
        assert_eq!(storage.get(task.task_id).await.unwrap().task_name, "Shower");
    }

    #[tokio::test]
    async fn delete_unknown_task_is_not_found() {
        let pool = setup_test_pool().await;
        let storage = TaskStorage::new(pool);

        assert!(matches!(
            storage.delete(404).await,
            Err(StorageError::NotFound)
        ));
    }
}
