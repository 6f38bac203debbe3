//! Database models and their mapping to domain sessions.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::hangman::{GameStatus, Letter, NewSession, Session, SessionId};

/// One row of the `games` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    word_to_guess: String,
    guessed_letters: String,
    incorrect_guesses: i32,
    max_incorrect_guesses: i32,
    status: String,
    created_at: NaiveDateTime,
}

impl GameRow {
    /// Converts the row into a domain session.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored status or guessed letters are malformed.
    #[instrument(skip(self), fields(id = self.id, status = %self.status))]
    pub fn into_session(self) -> Result<Session, DbError> {
        let status: GameStatus = self
            .status
            .parse()
            .map_err(|_| DbError::corrupt_row(self.id, format!("invalid status '{}'", self.status)))?;

        let guessed_letters = self
            .guessed_letters
            .chars()
            .map(Letter::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                DbError::corrupt_row(
                    self.id,
                    format!("invalid guessed letters '{}'", self.guessed_letters),
                )
            })?;

        Ok(Session::restore(
            SessionId::new(self.id),
            self.word_to_guess,
            guessed_letters,
            self.incorrect_guesses,
            self.max_incorrect_guesses,
            status,
            self.created_at,
        ))
    }
}

/// Insertable row for a new session; the database fills in the rest.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    word_to_guess: String,
    max_incorrect_guesses: i32,
}

impl From<&NewSession> for NewGameRow {
    fn from(new: &NewSession) -> Self {
        Self::new(new.secret_word().clone(), *new.max_wrong_allowed())
    }
}

/// The columns a guess may change.
#[derive(Debug, Clone, AsChangeset, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameChanges {
    guessed_letters: String,
    incorrect_guesses: i32,
    status: String,
}

impl From<&Session> for GameChanges {
    fn from(session: &Session) -> Self {
        Self {
            guessed_letters: session.guessed_string(),
            incorrect_guesses: *session.wrong_count(),
            status: session.status().as_ref().to_string(),
        }
    }
}
