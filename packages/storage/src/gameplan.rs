// ABOUTME: Gameplan entry storage layer using SQLite
// ABOUTME: Promotes task templates into ordered, timed slots and back out again

use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_core::{GameplanTask, GameplanTaskCreateInput};

use crate::StorageError;

pub struct GameplanStorage {
    pool: SqlitePool,
}

impl GameplanStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's gameplan, always ordered by slot position ascending.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<GameplanTask>, StorageError> {
        debug!("Fetching gameplan for user: {}", user_id);

        let rows =
            sqlx::query("SELECT * FROM gameplan_tasks WHERE user_id = ? ORDER BY position")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_gameplan_task).collect()
    }

    pub async fn get(&self, task_id: i64) -> Result<Option<GameplanTask>, StorageError> {
        debug!("Fetching gameplan entry for task: {}", task_id);

        let row = sqlx::query("SELECT * FROM gameplan_tasks WHERE task_id = ?")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.as_ref().map(row_to_gameplan_task).transpose()
    }

    pub async fn add(
        &self,
        user_id: i64,
        input: GameplanTaskCreateInput,
    ) -> Result<GameplanTask, StorageError> {
        debug!(
            "Adding task {} to gameplan of user {} at position {}",
            input.task_id, user_id, input.position
        );

        sqlx::query(
            r#"
            INSERT INTO gameplan_tasks (task_id, user_id, position, start_time, end_time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.task_id)
        .bind(user_id)
        .bind(input.position)
        .bind(input.start_time)
        .bind(input.end_time)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get(input.task_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Remove a scheduling entry, leaving the underlying task intact.
    pub async fn remove(&self, task_id: i64) -> Result<(), StorageError> {
        debug!("Removing task {} from gameplan", task_id);

        let result = sqlx::query("DELETE FROM gameplan_tasks WHERE task_id = ?")
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn row_to_gameplan_task(row: &sqlx::sqlite::SqliteRow) -> Result<GameplanTask, StorageError> {
    Ok(GameplanTask {
        task_id: row.try_get("task_id")?,
        user_id: row.try_get("user_id")?,
        position: row.try_get("position")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStorage;
    use crate::users::{NewUser, UserStorage};
    use chrono::{DateTime, TimeZone, Utc};
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

    async fn create_task(pool: &SqlitePool, user_id: i64, name: &str) -> i64 {
        TaskStorage::new(pool.clone())
            .create(
                user_id,
                gameplan_core::TaskCreateInput {
                    task_name: name.to_string(),
                    task_description: None,
                    duration_estimate: 10,
                },
            )
            .await
            .unwrap()
            .task_id
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
    }

    fn slot(task_id: i64, position: i64, hour: u32) -> GameplanTaskCreateInput {
        GameplanTaskCreateInput {
            task_id,
            position,
            start_time: at(hour, 0),
            end_time: at(hour, 10),
        }
    }

    #[tokio::test]
    async fn list_returns_entries_ordered_by_position() {
        let pool = setup_test_pool().await;
        let storage = GameplanStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;

        let first = create_task(&pool, alice, "Shower").await;
        let second = create_task(&pool, alice, "Breakfast").await;
        let third = create_task(&pool, alice, "Commute").await;

        // Insert out of order
        storage.add(alice, slot(third, 3, 9)).await.unwrap();
        storage.add(alice, slot(first, 1, 7)).await.unwrap();
        storage.add(alice, slot(second, 2, 8)).await.unwrap();

        let plan = storage.list_for_user(alice).await.unwrap();
        let positions: Vec<i64> = plan.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn remove_leaves_task_template_intact() {
        let pool = setup_test_pool().await;
        let storage = GameplanStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;
        let task_id = create_task(&pool, alice, "Shower").await;

        storage.add(alice, slot(task_id, 1, 7)).await.unwrap();
        storage.remove(task_id).await.unwrap();

        assert!(storage.get(task_id).await.unwrap().is_none());
        let task = TaskStorage::new(pool).get(task_id).await.unwrap();
        assert_eq!(task.task_name, "Shower");
    }

    // Slot position and times are unique per user, not globally; two users
    // plan their mornings independently.
    #[tokio::test]
    async fn two_users_may_hold_the_same_position() {
        let pool = setup_test_pool().await;
        let storage = GameplanStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;
        let bob = register_user(&pool, "bob").await;
        let alice_task = create_task(&pool, alice, "Shower").await;
        let bob_task = create_task(&pool, bob, "Run").await;

        storage.add(alice, slot(alice_task, 1, 7)).await.unwrap();
        storage.add(bob, slot(bob_task, 1, 7)).await.unwrap();

        assert_eq!(storage.list_for_user(alice).await.unwrap().len(), 1);
        assert_eq!(storage.list_for_user(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_position_for_one_user_is_rejected() {
        let pool = setup_test_pool().await;
        let storage = GameplanStorage::new(pool.clone());
        let alice = register_user(&pool, "alice").await;
        let first = create_task(&pool, alice, "Shower").await;
        let second = create_task(&pool, alice, "Breakfast").await;

        storage.add(alice, slot(first, 1, 7)).await.unwrap();
        let result = storage.add(alice, slot(second, 1, 8)).await;

        assert!(matches!(result, Err(StorageError::Sqlx(_))));
    }

    #[tokio::test]
    async fn remove_unknown_entry_is_not_found() {
        let pool = setup_test_pool().await;
        let storage = GameplanStorage::new(pool);

        assert!(matches!(
            storage.remove(404).await,
            Err(StorageError::NotFound)
        ));
    }
}
