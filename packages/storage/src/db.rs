// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and storage layers

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::categories::CategoryStorage;
use crate::gameplan::GameplanStorage;
use crate::sessions::SessionStorage;
use crate::settings::SettingsStorage;
use crate::tasks::TaskStorage;
use crate::users::UserStorage;
use crate::StorageError;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub user_storage: Arc<UserStorage>,
    pub task_storage: Arc<TaskStorage>,
    pub gameplan_storage: Arc<GameplanStorage>,
    pub settings_storage: Arc<SettingsStorage>,
    pub session_storage: Arc<SessionStorage>,
    pub category_storage: Arc<CategoryStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_storage: Arc::new(UserStorage::new(pool.clone())),
            task_storage: Arc::new(TaskStorage::new(pool.clone())),
            gameplan_storage: Arc::new(GameplanStorage::new(pool.clone())),
            settings_storage: Arc::new(SettingsStorage::new(pool.clone())),
            session_storage: Arc::new(SessionStorage::new(pool.clone())),
            category_storage: Arc::new(CategoryStorage::new(pool.clone())),
            pool,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(
        database_path: Option<std::path::PathBuf>,
    ) -> Result<Self, StorageError> {
        let database_path =
            database_path.unwrap_or_else(|| gameplan_core::gameplan_dir().join("gameplan.db"));

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true);

        // Configure connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }
}
