mod bot;
mod config;
mod controller;
mod data;
mod error;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    bot::start::{init_bot, start_bot},
    config::Config,
    error::AppError,
    scheduler::quota_rollover,
    service::roblox::RobloxClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    startup::prepare_transcripts_dir(&config).await?;
    let roblox = RobloxClient::new(startup::setup_reqwest_client()?);

    tracing::info!("Starting middleman bot");

    let bot_client = init_bot(config.clone(), db.clone(), roblox).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Held for the life of the process; dropping it stops the jobs
    let _scheduler = quota_rollover::start_scheduler(db.clone()).await?;

    let app = router::router(AppState::new(config.clone()));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Transcript server listening on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
