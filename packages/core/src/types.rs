// ABOUTME: Domain type definitions for Gameplan
// ABOUTME: Users, task templates, gameplan entries, and the settings catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered user. The stored credential is an argon2id hash; the
/// plaintext password never leaves the registration/login handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub home_address: Option<String>,
    pub destination_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {} ({})", self.user_id, self.username)
    }
}

/// User representation safe to hand to a rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskedUser {
    pub user_id: i64,
    pub username: String,
    pub home_address: Option<String>,
    pub destination_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for MaskedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            home_address: user.home_address,
            destination_address: user.destination_address,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreateInput {
    pub username: String,
    pub password: String,
    pub home_address: Option<String>,
    pub destination_address: Option<String>,
}

/// A task template: something to do, with no scheduled time until it is
/// promoted into the gameplan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub user_id: i64,
    pub task_name: String,
    pub task_description: Option<String>,
    /// Estimated duration in minutes
    pub duration_estimate: i64,
    /// Actual duration in minutes, once known
    pub duration_actual: Option<i64>,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task {} ({}) of user {}",
            self.task_id, self.task_name, self.user_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateInput {
    pub task_name: String,
    pub task_description: Option<String>,
    pub duration_estimate: i64,
}

/// A task promoted into the morning gameplan. Shares its primary key with
/// the underlying task, which enforces the one-to-one relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplanTask {
    pub task_id: i64,
    pub user_id: i64,
    /// Slot within the gameplan, unique per user. Serialized as `order`,
    /// the name the web surface has always used.
    #[serde(rename = "order")]
    pub position: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl fmt::Display for GameplanTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameplanTask {} at position {} of user {}",
            self.task_id, self.position, self.user_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplanTaskCreateInput {
    pub task_id: i64,
    #[serde(rename = "order")]
    pub position: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A settings catalog entry. The catalog holds the names and defaults of
/// every configurable setting; per-user values live in `UserSetting`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub setting_id: i64,
    pub setting_name: String,
    pub default_value: String,
}

/// One user's value for one catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSetting {
    pub user_setting_id: i64,
    pub user_id: i64,
    pub setting_id: i64,
    pub value: String,
}

impl fmt::Display for UserSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserSetting {} (setting {} of user {})",
            self.user_setting_id, self.setting_id, self.user_id
        )
    }
}

/// A tag applicable to tasks. Persisted but carries no HTTP surface yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

/// Pure association row pairing a task with a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCategory {
    pub tasks_categories_id: i64,
    pub task_id: i64,
    pub category_id: Option<i64>,
}
