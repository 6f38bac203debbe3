//! Strictly Hangman - Unified CLI
//!
//! Runs the game server, plays against it from a terminal, or lists stored games.

#![warn(missing_docs)]

mod cli;
mod play;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_hangman::{
    GameRepository, GameService, GameStatus, InMemorySessionStore, RandomWordSource,
    ServerConfig, SessionStore,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db_path,
            in_memory,
        } => run_server(config, host, port, db_path, in_memory).await,
        Command::Play { server_url, game_id } => play::run_play(server_url, game_id).await,
        Command::Games { db_path, status } => list_games(db_path, status),
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db_path: Option<String>,
    in_memory: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(db_path) = db_path {
        config = config.with_db_path(db_path);
    }

    let store: Arc<dyn SessionStore> = if in_memory {
        info!("Using in-memory session store");
        Arc::new(InMemorySessionStore::new())
    } else {
        info!(db_path = %config.db_path(), "Using SQLite session store");
        Arc::new(GameRepository::open(config.db_path().clone())?)
    };

    let words = Arc::new(RandomWordSource::new(config.words().clone())?);
    let service = GameService::new(store, words);

    strictly_hangman::serve(&config, service).await
}

/// Print stored games, newest first
#[instrument]
fn list_games(db_path: String, status: Option<GameStatus>) -> Result<()> {
    let repository = GameRepository::open(db_path).context("Failed to open game database")?;
    let sessions = repository.list(status)?;

    println!(
        "{:>6}  {:<12}  {:<10}  {:>9}  {}",
        "ID", "WORD", "STATUS", "INCORRECT", "CREATED"
    );
    for session in &sessions {
        println!(
            "{:>6}  {:<12}  {:<10}  {:>9}  {}",
            session.id().value(),
            session.secret_word(),
            session.status().as_ref(),
            format!("{}/{}", session.wrong_count(), session.max_wrong_allowed()),
            session.created_at().format("%Y-%m-%d %H:%M:%S"),
        );
    }

    info!(count = sessions.len(), "Listed games");
    Ok(())
}
