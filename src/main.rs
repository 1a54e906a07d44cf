use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod app;
mod auth;
mod config;
mod error;
mod forms;
mod state;
mod store;
mod themes;
mod utils;
mod votes;

use crate::{config::AppConfig, state::AppState, store::PgStore};

#[derive(Parser)]
#[command(name = "formvote", about = "Voting forms with capped options")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Write the default theme catalog and exit.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "formvote=debug,axum=info,tower_http=info".to_string());
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

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let db = AppState::connect(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    let state = AppState::from_parts(Arc::new(PgStore::new(db)), Arc::new(config));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => app::serve(app::build_app(state)).await,
        Command::Seed => {
            let written = state.themes.seed_defaults().await?;
            tracing::info!(written, "seed finished");
            Ok(())
        }
    }
}
