// ABOUTME: HTTP API layer for Gameplan providing REST endpoints and routing
// ABOUTME: Maps every user-facing action onto the storage layer

use axum::{
    routing::{get, post},
    Router,
};

use gameplan_storage::DbState;

pub mod auth;
pub mod auth_handlers;
pub mod error;
pub mod gameplan_handlers;
pub mod pages_handlers;
pub mod response;
pub mod settings_handlers;
pub mod tasks_handlers;


pub use error::ApiError;
pub use response::ApiResponse;

/// Creates the application router with all routes bound to shared state.
///
/// Plain HTML forms cannot send DELETE or PUT, so GET is accepted as an
/// alias on the two delete endpoints and on the setting update.
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/", get(pages_handlers::home))
        .route("/about", get(pages_handlers::about))
        .route("/register", get(pages_handlers::register_form))
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/logout", get(auth_handlers::logout))
        .route("/dashboard", get(pages_handlers::dashboard))
        .route("/settings", get(settings_handlers::list_settings))
        .route(
            "/api/setting/{user_setting_id}",
            get(settings_handlers::update_setting_via_query).put(settings_handlers::update_setting),
        )
        .route("/api/tasks", get(tasks_handlers::list_tasks))
        .route("/api/task", post(tasks_handlers::create_task))
        .route(
            "/api/task/{task_id}",
            get(tasks_handlers::delete_task).delete(tasks_handlers::delete_task),
        )
        .route(
            "/api/add_task_to_gameplan",
            post(gameplan_handlers::add_task_to_gameplan),
        )
        .route(
            "/api/gptask/{task_id}",
            get(gameplan_handlers::remove_from_gameplan)
                .delete(gameplan_handlers::remove_from_gameplan),
        )
        .route("/api/health", get(pages_handlers::health))
        .with_state(db)
}
