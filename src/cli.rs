//! Command-line interface for strictly_hangman.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use strictly_hangman::GameStatus;

/// Strictly Hangman - word-guessing game server
#[derive(Parser, Debug)]
#[command(name = "strictly_hangman")]
#[command(about = "Hangman game server with a REST interface", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file (overrides config and HANGMAN_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,

        /// Keep games in memory only; nothing survives a restart
        #[arg(long)]
        in_memory: bool,
    },

    /// Play a game in the terminal against a running server
    Play {
        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        server_url: String,

        /// Resume an existing game instead of starting a new one
        #[arg(long)]
        game_id: Option<i32>,
    },

    /// List stored games (admin view, shows secret words)
    Games {
        /// SQLite database file
        #[arg(long, env = "HANGMAN_DB_PATH", default_value = "strictly_hangman.db")]
        db_path: String,

        /// Only show games with this status (InProgress, Won, Lost)
        #[arg(long)]
        status: Option<GameStatus>,
    },
}
