// ABOUTME: Core types and utilities for Gameplan
// ABOUTME: Foundational package providing shared domain types across all packages

pub mod constants;
pub mod types;

// Re-export main types
pub use types::{
    Category, GameplanTask, GameplanTaskCreateInput, MaskedUser, Setting, Task, TaskCategory,
    TaskCreateInput, User, UserCreateInput, UserSetting,
};

// Re-export constants
pub use constants::{
    gameplan_dir, DASHBOARD_SETTINGS, SETTING_INTENTION, SETTING_NOTES_REMINDERS, SETTING_PRIORITY,
};
