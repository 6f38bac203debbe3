//! Hangman game engine.
//!
//! Everything here is pure: no I/O, no clocks, no global randomness. Stores
//! and transports live outside and call in.

mod action;
mod invariants;
mod rules;
mod types;
mod view;
mod words;

pub use action::{GuessError, InvalidGuess, Letter};
pub use invariants::{
    GuessHistoryConsistent, Invariant, InvariantSet, InvariantViolation, LostImpliesCapped,
    SessionInvariants, WonImpliesSolved, WrongCountCapped,
};
pub use rules::{GuessOutcome, apply_guess, max_wrong_for, new_session};
pub use types::{GameStatus, NewSession, Session, SessionId};
pub use view::{GameView, MASK, masked_word};
pub use words::{
    DEFAULT_WORDS, FixedWordSource, RandomWordSource, WordSource, WordSourceError,
    validate_vocabulary,
};
