// ABOUTME: Storage for task categories and their association rows
// ABOUTME: Persistence only; no request handler mutates these yet

use sqlx::{Row, SqlitePool};
use tracing::debug;

use gameplan_core::{Category, TaskCategory};

use crate::StorageError;

pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, category_name: &str) -> Result<Category, StorageError> {
        debug!("Creating category: {}", category_name);

        let result = sqlx::query("INSERT INTO categories (category_name) VALUES (?)")
            .bind(category_name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Category {
            category_id: result.last_insert_rowid(),
            category_name: category_name.to_string(),
        })
    }

    pub async fn list(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query("SELECT * FROM categories ORDER BY category_id")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                Ok(Category {
                    category_id: row.try_get("category_id")?,
                    category_name: row.try_get("category_name")?,
                })
            })
            .collect()
    }

    pub async fn tag_task(
        &self,
        task_id: i64,
        category_id: i64,
    ) -> Result<TaskCategory, StorageError> {
        debug!("Tagging task {} with category {}", task_id, category_id);

        let result =
            sqlx::query("INSERT INTO tasks_categories (task_id, category_id) VALUES (?, ?)")
                .bind(task_id)
                .bind(category_id)
                .execute(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(TaskCategory {
            tasks_categories_id: result.last_insert_rowid(),
            task_id,
            category_id: Some(category_id),
        })
    }

    pub async fn categories_for_task(&self, task_id: i64) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT c.category_id, c.category_name FROM categories c
            JOIN tasks_categories tc ON tc.category_id = c.category_id
            WHERE tc.task_id = ?
            ORDER BY c.category_id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                Ok(Category {
                    category_id: row.try_get("category_id")?,
                    category_name: row.try_get("category_name")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStorage;
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

    #[tokio::test]
    async fn categories_persist_and_associate_with_tasks() {
        let pool = setup_test_pool().await;
        let storage = CategoryStorage::new(pool.clone());

        let alice = UserStorage::new(pool.clone())
            .register(NewUser {
                username: "alice".to_string(),
                password_hash: gameplan_auth::hash_password("pw1").unwrap(),
                home_address: None,
                destination_address: None,
            })
            .await
            .unwrap();
        let task = TaskStorage::new(pool.clone())
            .create(
                alice.user_id,
                gameplan_core::TaskCreateInput {
                    task_name: "Shower".to_string(),
                    task_description: None,
                    duration_estimate: 10,
                },
            )
            .await
            .unwrap();

        let must_do = storage.create("must-do").await.unwrap();
        storage.create("optional").await.unwrap();
        storage.tag_task(task.task_id, must_do.category_id).await.unwrap();

        assert_eq!(storage.list().await.unwrap().len(), 2);
        let tagged = storage.categories_for_task(task.task_id).await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].category_name, "must-do");
    }
}
