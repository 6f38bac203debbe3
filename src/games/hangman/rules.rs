//! Game rules for hangman: session creation and the guess state machine.

use derive_getters::Getters;
use tracing::{debug, info, instrument};

use super::action::{GuessError, Letter};
use super::invariants::{InvariantSet, SessionInvariants};
use super::types::{GameStatus, NewSession, Session};

/// Number of wrong guesses allowed for a word: half its length, rounded up, at least one.
pub fn max_wrong_for(word: &str) -> i32 {
    let len = word.chars().count() as i32;
    ((len + 1) / 2).max(1)
}

/// Prepares a new session for `word`.
///
/// The word is trimmed and uppercased; the wrong-guess cap is derived from its length.
#[instrument]
pub fn new_session(word: &str) -> NewSession {
    let secret_word = word.trim().to_uppercase();
    let max_wrong_allowed = max_wrong_for(&secret_word);
    debug!(word_length = secret_word.len(), max_wrong_allowed, "Prepared new session");
    NewSession::new(secret_word, max_wrong_allowed)
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuessOutcome {
    /// The session after the guess.
    session: Session,
    /// Whether the letter occurs in the word.
    correct: bool,
    /// Human-readable outcome.
    message: String,
}

impl GuessOutcome {
    /// Consumes the outcome, returning the updated session.
    pub fn into_session(self) -> Session {
        self.session
    }
}

/// Applies a raw guess token to a session.
///
/// Preconditions are checked in order: the session must be in progress, the token
/// must be a single letter, and the letter must not have been guessed before. The
/// first failing check rejects the guess and `session` is left as it was.
///
/// On acceptance the win check runs before the loss check, so a guess that
/// completes the word wins even when the wrong-guess cap is also reached.
///
/// # Errors
///
/// Returns [`GuessError`] describing the first failed precondition.
#[instrument(skip(session), fields(session_id = %session.id(), status = %session.status()))]
pub fn apply_guess(session: &Session, raw: &str) -> Result<GuessOutcome, GuessError> {
    if session.status().is_terminal() {
        debug!("Guess against finished game");
        return Err(GuessError::GameAlreadyOver(*session.status()));
    }

    let letter = Letter::parse(raw)?;

    if session.has_guessed(letter) {
        debug!(%letter, "Duplicate guess");
        return Err(GuessError::DuplicateGuess(letter));
    }

    let mut next = session.clone();
    next.push_guess(letter);

    let correct = next.secret_word().contains(letter.as_char());
    if !correct {
        next.add_wrong_guess();
    }

    if next.is_solved() {
        next.set_status(GameStatus::Won);
    } else if next.wrong_count() >= next.max_wrong_allowed() {
        next.set_status(GameStatus::Lost);
    }

    debug_assert!(
        SessionInvariants::check_all(&next).is_ok(),
        "guess produced an invalid session"
    );

    let message = outcome_message(&next, correct);
    info!(
        %letter,
        correct,
        wrong_count = next.wrong_count(),
        status = %next.status(),
        "Guess applied"
    );

    Ok(GuessOutcome {
        session: next,
        correct,
        message,
    })
}

fn outcome_message(session: &Session, correct: bool) -> String {
    match session.status() {
        GameStatus::Won => "Congratulations! You've Won!".to_string(),
        GameStatus::Lost => format!(
            "Game Over! The correct word was {}.",
            session.secret_word()
        ),
        GameStatus::InProgress if correct => "Correct Guess!".to_string(),
        GameStatus::InProgress => "Incorrect Guess".to_string(),
    }
}
