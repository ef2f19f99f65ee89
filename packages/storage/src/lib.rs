// ABOUTME: SQLite persistence layer for Gameplan
// ABOUTME: Storage structs, shared DbState, and the storage error taxonomy

use thiserror::Error;

pub mod categories;
pub mod db;
pub mod gameplan;
pub mod sessions;
pub mod settings;
pub mod tasks;
pub mod users;

pub use categories::CategoryStorage;
pub use db::DbState;
pub use gameplan::GameplanStorage;
pub use sessions::{Session, SessionStorage};
pub use settings::SettingsStorage;
pub use tasks::TaskStorage;
pub use users::{NewUser, UserStorage};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),
    #[error("Task is still scheduled in a gameplan")]
    TaskInGameplan,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Whether an sqlx error is a uniqueness violation reported by SQLite.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.kind() == sqlx::error::ErrorKind::UniqueViolation)
        .unwrap_or(false)
}

/// Whether an sqlx error is a foreign-key violation reported by SQLite.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation)
        .unwrap_or(false)
}
