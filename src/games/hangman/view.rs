//! Client-safe projection of a session.
//!
//! The projection never contains the secret word. The only place the word is
//! revealed is the outcome message of the guess that loses the game.

use serde::{Deserialize, Serialize};

use super::{GameStatus, Letter, Session, SessionId};

/// Placeholder for letters that have not been guessed.
pub const MASK: char = '_';

/// What a player is allowed to see of a session.
///
/// Field names on the wire match what existing front ends expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Session identifier.
    pub id: SessionId,
    /// Session status.
    pub status: GameStatus,
    /// The word with unguessed letters replaced by `_`.
    #[serde(rename = "current_word_state")]
    pub masked_word: String,
    /// Wrong guesses so far.
    #[serde(rename = "incorrect_guesses_made")]
    pub wrong_guesses_made: i32,
    /// Wrong guesses left before the game is lost.
    #[serde(rename = "remaining_incorrect_guesses")]
    pub remaining_wrong_guesses: i32,
    /// Number of letters in the word.
    pub word_length: usize,
    /// Letters guessed so far, in guess order.
    pub guessed_letters: String,
}

impl GameView {
    /// Projects a session into its public view.
    pub fn project(session: &Session) -> Self {
        Self {
            id: *session.id(),
            status: *session.status(),
            masked_word: masked_word(session.secret_word(), session.guessed_letters()),
            wrong_guesses_made: *session.wrong_count(),
            remaining_wrong_guesses: (session.max_wrong_allowed() - session.wrong_count()).max(0),
            word_length: session.secret_word().chars().count(),
            guessed_letters: session.guessed_string(),
        }
    }

    /// Returns the cap on wrong guesses implied by this view.
    pub fn max_wrong_guesses(&self) -> i32 {
        self.wrong_guesses_made + self.remaining_wrong_guesses
    }
}

/// Masks every character of `word` that is not in `guessed`.
///
/// Length and order are preserved.
pub fn masked_word(word: &str, guessed: &[Letter]) -> String {
    if guessed.is_empty() {
        return std::iter::repeat_n(MASK, word.chars().count()).collect();
    }

    word.chars()
        .map(|c| {
            if guessed.iter().any(|l| l.as_char() == c) {
                c
            } else {
                MASK
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().map(|c| Letter::try_from(c).expect("letter")).collect()
    }

    #[test]
    fn test_nothing_guessed_is_all_underscores() {
        assert_eq!(masked_word("BOTTLE", &[]), "______");
    }

    #[test]
    fn test_full_alphabet_reveals_word() {
        let alphabet = letters("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(masked_word("AUDACIX", &alphabet), "AUDACIX");
    }

    #[test]
    fn test_partial_mask_keeps_positions() {
        assert_eq!(masked_word("BOTTLE", &letters("TZ")), "__TT__");
    }
}
