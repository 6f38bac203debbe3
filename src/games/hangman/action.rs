//! Guess tokens and the ways a guess can be rejected.
//!
//! A raw guess from the wire is parsed into a [`Letter`] before it ever
//! touches a session, so the rules only deal with validated input.

use tracing::instrument;

use super::GameStatus;

/// A single alphabetic character in uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(char);

impl Letter {
    /// Parses a raw guess token.
    ///
    /// Surrounding whitespace is trimmed and the token is uppercased; what remains
    /// must be exactly one alphabetic character. Non-ASCII letters such as `é`
    /// are accepted and stored as `É`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGuess::Empty`] for blank input and
    /// [`InvalidGuess::NotSingleLetter`] for anything else that is not one letter.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, InvalidGuess> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidGuess::Empty);
        }

        let upper = trimmed.to_uppercase();
        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_upper_letter(c) => Ok(Self(c)),
            _ => Err(InvalidGuess::NotSingleLetter),
        }
    }

    /// Returns the letter as a `char`.
    pub fn as_char(self) -> char {
        self.0
    }
}

/// Alphabetic and already in the form `to_uppercase` produces.
///
/// Letters without an uppercase mapping (like `ª`) count as uppercase.
fn is_upper_letter(c: char) -> bool {
    c.is_alphabetic() && c.to_uppercase().eq(std::iter::once(c))
}

impl TryFrom<char> for Letter {
    type Error = InvalidGuess;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if is_upper_letter(c) {
            Ok(Self(c))
        } else {
            Err(InvalidGuess::NotSingleLetter)
        }
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a raw guess token is not a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidGuess {
    /// Nothing left after trimming.
    #[display("No guess provided.")]
    Empty,

    /// More than one character, or a non-letter.
    #[display("Invalid guess. Please provide a single letter.")]
    NotSingleLetter,
}

impl std::error::Error for InvalidGuess {}

/// Error returned when a guess is rejected.
///
/// A rejected guess never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GuessError {
    /// The session already reached a terminal status.
    #[display("Game already {}", _0)]
    GameAlreadyOver(GameStatus),

    /// The token is not exactly one letter.
    #[display("{}", _0)]
    InvalidGuess(InvalidGuess),

    /// The letter was guessed before.
    #[display("Letter already guessed!")]
    DuplicateGuess(Letter),
}

impl std::error::Error for GuessError {}

impl From<InvalidGuess> for GuessError {
    fn from(err: InvalidGuess) -> Self {
        Self::InvalidGuess(err)
    }
}
