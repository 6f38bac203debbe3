//! Core domain types for hangman.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use super::action::Letter;

/// Unique identifier for a game session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SessionId(i32);

impl SessionId {
    /// Wraps a raw identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub fn value(self) -> i32 {
        self.0
    }
}

/// Current status of a session.
///
/// `Won` and `Lost` are terminal: a session in either state never changes again.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum GameStatus {
    /// Guesses are still accepted.
    InProgress,
    /// Every letter of the word was guessed.
    Won,
    /// The wrong-guess cap was reached.
    Lost,
}

impl GameStatus {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A session that has not been assigned an identifier yet.
///
/// Produced by [`new_session`](super::new_session) and handed to a store,
/// which assigns the id and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NewSession {
    secret_word: String,
    max_wrong_allowed: i32,
}

impl NewSession {
    pub(super) fn new(secret_word: String, max_wrong_allowed: i32) -> Self {
        Self {
            secret_word,
            max_wrong_allowed,
        }
    }
}

/// One in-progress or finished game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    id: SessionId,
    secret_word: String,
    /// Letters in the order they were guessed.
    guessed_letters: Vec<Letter>,
    wrong_count: i32,
    max_wrong_allowed: i32,
    status: GameStatus,
    created_at: NaiveDateTime,
}

impl Session {
    /// Materializes a freshly created session once the store has assigned its id.
    pub fn from_new(id: SessionId, new: NewSession, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            secret_word: new.secret_word,
            guessed_letters: Vec::new(),
            wrong_count: 0,
            max_wrong_allowed: new.max_wrong_allowed,
            status: GameStatus::InProgress,
            created_at,
        }
    }

    /// Rebuilds a session from persisted fields.
    ///
    /// No rule checking happens here; stores are trusted to hand back what they were given.
    pub fn restore(
        id: SessionId,
        secret_word: String,
        guessed_letters: Vec<Letter>,
        wrong_count: i32,
        max_wrong_allowed: i32,
        status: GameStatus,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            secret_word,
            guessed_letters,
            wrong_count,
            max_wrong_allowed,
            status,
            created_at,
        }
    }

    /// Returns true if `letter` was already guessed.
    pub fn has_guessed(&self, letter: Letter) -> bool {
        self.guessed_letters.contains(&letter)
    }

    /// Returns true if every distinct letter of the word has been guessed.
    pub fn is_solved(&self) -> bool {
        self.secret_word
            .chars()
            .all(|c| self.guessed_letters.iter().any(|l| l.as_char() == c))
    }

    /// Guessed letters joined in guess order, e.g. `"ZXQ"`.
    pub fn guessed_string(&self) -> String {
        self.guessed_letters.iter().map(|l| l.as_char()).collect()
    }

    pub(super) fn push_guess(&mut self, letter: Letter) {
        self.guessed_letters.push(letter);
    }

    pub(super) fn add_wrong_guess(&mut self) {
        self.wrong_count += 1;
    }

    pub(super) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}
