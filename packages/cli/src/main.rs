// ABOUTME: Gameplan server entry point
// ABOUTME: Wires configuration, database state, CORS, and the API router

use axum::http::Method;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;

use config::Config;
use gameplan_storage::DbState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameplan=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    info!("Starting Gameplan server on port {}", config.port);
    info!("CORS origin: {}", config.cors_origin);

    let db = DbState::init_with_path(config.database_path.clone()).await?;

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = gameplan_api::create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
