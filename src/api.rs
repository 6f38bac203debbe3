//! JSON bodies exchanged over HTTP.

use serde::{Deserialize, Serialize};

use crate::games::hangman::{GameView, SessionId};

/// Response to `POST /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedGame {
    /// Identifier of the new session.
    pub id: SessionId,
}

/// Body of `POST /games/{id}/guess`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    /// The guessed letter. A missing field counts as an empty guess.
    #[serde(default)]
    pub guess: String,
}

/// Response to an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// Whether the letter is in the word.
    pub correct: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Session state after the guess.
    pub game_state: GameView,
}

/// Error body. `game_state` is echoed when the caller may need to resync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error.
    pub error: String,
    /// Current session state, when relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameView>,
}

impl ErrorBody {
    /// Error without session state.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            game_state: None,
        }
    }

    /// Error echoing the current session state.
    pub fn with_state(error: impl Into<String>, game_state: GameView) -> Self {
        Self {
            error: error.into(),
            game_state: Some(game_state),
        }
    }
}

/// Response to `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"` while the server is up.
    pub status: String,
}
