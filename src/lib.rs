//! Strictly Hangman library - a word-guessing game server
//!
//! The game rules are a pure state machine: a session value goes in, an
//! updated session and an outcome come out. Storage and HTTP are layered
//! around it.
//!
//! # Architecture
//!
//! - **Engine**: session creation, guess application, public projection
//! - **Store**: [`SessionStore`] backed by SQLite or process memory
//! - **Service**: [`GameService`] serializes guesses per session and persists results
//! - **Server**: axum REST endpoints over the service
//! - **Client**: reqwest client for the REST endpoints
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_hangman::{FixedWordSource, GameService, GameStatus, InMemorySessionStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = GameService::new(
//!     Arc::new(InMemorySessionStore::new()),
//!     Arc::new(FixedWordSource::new(["Pen"])?),
//! );
//!
//! let game = service.create_game()?;
//! for letter in ["p", "e", "n"] {
//!     service.make_guess(*game.id(), letter)?;
//! }
//! assert_eq!(*service.game(*game.id())?.status(), GameStatus::Won);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod client;
mod config;
mod db;
mod games;
mod server;
mod service;
mod store;

// Crate-level exports - Game engine
pub use games::hangman::{
    DEFAULT_WORDS, FixedWordSource, GameStatus, GameView, GuessError, GuessHistoryConsistent,
    GuessOutcome, InvalidGuess, Invariant, InvariantSet, InvariantViolation, Letter,
    LostImpliesCapped, MASK, NewSession, RandomWordSource, Session, SessionId,
    SessionInvariants, WonImpliesSolved, WordSource, WordSourceError, WrongCountCapped,
    apply_guess, masked_word, max_wrong_for, new_session, validate_vocabulary,
};

// Crate-level exports - Persistence
pub use db::{DbError, DbErrorKind, GameChanges, GameRepository, GameRow, NewGameRow};
pub use store::{InMemorySessionStore, SessionStore, StoreError};

// Crate-level exports - Service
pub use service::{GameService, ServiceError};

// Crate-level exports - HTTP
pub use api::{CreatedGame, ErrorBody, GuessRequest, GuessResponse, Health};
pub use server::{ApiError, router, serve};

// Crate-level exports - Client
pub use client::{GuessReply, HangmanClient, render_view};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};
