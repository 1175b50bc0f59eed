mod app;
mod auth;
mod config;
mod contact;
mod error;
mod response;
mod state;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Fatal on missing DATABASE_URL or JWT_SECRET.
    let config = Arc::new(AppConfig::from_env()?);

    let default_filter = if config.environment.is_production() {
        "auratech_backend=info,axum=info,tower_http=info"
    } else {
        "auratech_backend=debug,axum=info,tower_http=info"
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Fatal on unreachable database.
    let app_state = AppState::init(config.clone()).await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing with existing schema");
    }

    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
